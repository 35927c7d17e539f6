use bevy::color::palettes::css::{BLUE, RED};
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::utils::HashMap;
use thiserror::Error;

use crate::input::{self, PointerId};
use crate::lifespan::Lifespan;

const MARKER_LIFETIME: f32 = 1.0;
const MARKER_Z: f32 = 20.0;

#[derive(Error, Debug, PartialEq)]
pub enum SwipeConfigError {
    #[error("deadzone must be in [0, 1), got {0}")]
    DeadzoneOutOfRange(f32),

    #[error("max duration must be positive, got {0}")]
    NonPositiveDuration(f32),
}

/// Recognizer tuning. `max_duration` rejects slow drags; `deadzone` is the
/// minimum unit-vector component needed to call a direction triggered.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub max_duration: f32,
    pub deadzone: f32,
    /// Spawn transient markers at the gesture endpoints on release.
    pub debug_markers: bool,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            max_duration: 1.0,
            deadzone: 0.3,
            debug_markers: false,
        }
    }
}

impl SwipeConfig {
    pub fn new(max_duration: f32, deadzone: f32) -> Result<Self, SwipeConfigError> {
        if max_duration <= 0.0 {
            return Err(SwipeConfigError::NonPositiveDuration(max_duration));
        }
        if !(0.0..1.0).contains(&deadzone) {
            return Err(SwipeConfigError::DeadzoneOutOfRange(deadzone));
        }
        Ok(Self {
            max_duration,
            deadzone,
            ..Self::default()
        })
    }
}

/// A finalized gesture, delivered once per qualifying release. The direction
/// flags are not mutually exclusive: a diagonal swipe reports both axes.
#[derive(Clone, Copy, Debug)]
pub struct Swipe {
    pub start: Vec2,
    pub end: Vec2,
    /// Unit vector of the last movement increment, zero if the pointer never
    /// moved. Deliberately not the overall start-to-end direction.
    pub direction: Vec2,
    pub start_time: f32,
    pub end_time: f32,
    pub is_up: bool,
    pub is_down: bool,
    pub is_left: bool,
    pub is_right: bool,
}

impl Swipe {
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }
}

#[derive(Event, Clone, Copy, Debug)]
pub struct SwipeEvent(pub Swipe);

/// In-progress gestures keyed by pointer. Entries are inserted on press and
/// removed on release, so the map stays bounded by the number of simultaneous
/// contact points.
#[derive(Resource, Default)]
pub struct SwipeTracker {
    gestures: HashMap<PointerId, Swipe>,
}

impl SwipeTracker {
    pub fn begin(&mut self, pointer: PointerId, position: Vec2, now: f32) {
        self.gestures.insert(
            pointer,
            Swipe {
                start: position,
                end: position,
                direction: Vec2::ZERO,
                start_time: now,
                end_time: now,
                is_up: false,
                is_down: false,
                is_left: false,
                is_right: false,
            },
        );
    }

    /// Folds a movement into the gesture. Unknown pointers are ignored: a
    /// move can arrive without its press ever having been seen.
    pub fn track(&mut self, pointer: PointerId, position: Vec2) {
        let Some(swipe) = self.gestures.get_mut(&pointer) else {
            return;
        };
        if position == swipe.end {
            return;
        }
        swipe.direction = (position - swipe.end).normalize_or_zero();
        swipe.end = position;
    }

    /// Ends the gesture and classifies it. Returns `None` for unknown
    /// pointers and for touches held longer than `max_duration`.
    pub fn finish(
        &mut self,
        pointer: PointerId,
        now: f32,
        config: &SwipeConfig,
    ) -> Option<Swipe> {
        let mut swipe = self.gestures.remove(&pointer)?;
        swipe.end_time = now;

        if swipe.duration() > config.max_duration {
            return None;
        }

        swipe.is_up = swipe.direction.y > config.deadzone;
        swipe.is_down = swipe.direction.y < -config.deadzone;
        swipe.is_left = swipe.direction.x < -config.deadzone;
        swipe.is_right = swipe.direction.x > config.deadzone;

        Some(swipe)
    }
}

pub struct SwipePlugin;

impl Plugin for SwipePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SwipeConfig>()
            .init_resource::<SwipeTracker>()
            .add_event::<SwipeEvent>()
            .add_systems(Update, track_swipes);
    }
}

fn track_swipes(
    mut tracker: ResMut<SwipeTracker>,
    mut events: EventWriter<SwipeEvent>,
    mut commands: Commands,
    config: Res<SwipeConfig>,
    time: Res<Time>,
    button_input: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
) {
    let now = time.elapsed_secs();

    for (pointer, position) in input::just_pressed_pointers(&button_input, &touch_input, &windows)
    {
        let Some(world_position) = input::screen_to_world(position, &camera) else {
            continue;
        };
        tracker.begin(pointer, world_position, now);
    }

    for (pointer, position) in
        input::moved_pointers(&button_input, &mouse_motion, &touch_input, &windows)
    {
        let Some(world_position) = input::screen_to_world(position, &camera) else {
            continue;
        };
        tracker.track(pointer, world_position);
    }

    for (pointer, _) in input::just_released_pointers(&button_input, &touch_input, &windows) {
        let Some(swipe) = tracker.finish(pointer, now, &config) else {
            continue;
        };
        if config.debug_markers {
            spawn_gesture_markers(&mut commands, &swipe);
        }
        events.send(SwipeEvent(swipe));
    }
}

/// Slash along the final direction plus dots at both endpoints, fading out on
/// their own. Purely visual.
fn spawn_gesture_markers(commands: &mut Commands, swipe: &Swipe) {
    commands.spawn((
        Sprite::from_color(Color::Srgba(RED), Vec2::new(100.0, 10.0)),
        Transform::from_translation(swipe.end.extend(MARKER_Z))
            .with_rotation(Quat::from_rotation_z(swipe.direction.to_angle())),
        Lifespan::new(MARKER_LIFETIME),
    ));
    for position in [swipe.start, swipe.end] {
        commands.spawn((
            Sprite::from_color(Color::Srgba(BLUE), Vec2::splat(16.0)),
            Transform::from_translation(position.extend(MARKER_Z)),
            Lifespan::new(MARKER_LIFETIME),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTER: PointerId = PointerId::Touch(7);

    fn default_config() -> SwipeConfig {
        SwipeConfig::default()
    }

    #[test]
    fn fast_horizontal_swipe_reports_right_only() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(POINTER, Vec2::ZERO, 0.0);
        tracker.track(POINTER, Vec2::new(60.0, 2.0));
        tracker.track(POINTER, Vec2::new(140.0, 5.0));

        let swipe = tracker
            .finish(POINTER, 0.2, &default_config())
            .expect("fast swipe should classify");

        assert!(swipe.is_right, "rightward motion should set is_right");
        assert!(
            !swipe.is_left && !swipe.is_up && !swipe.is_down,
            "pure horizontal swipe should set no other flag"
        );
        assert!(
            (swipe.direction.length() - 1.0).abs() < 1e-5,
            "direction should be a unit vector"
        );
    }

    #[test]
    fn slow_drag_is_discarded() {
        let config = default_config();
        let mut tracker = SwipeTracker::default();
        tracker.begin(POINTER, Vec2::ZERO, 0.0);
        tracker.track(POINTER, Vec2::new(300.0, 0.0));

        assert!(
            tracker.finish(POINTER, config.max_duration + 0.5, &config).is_none(),
            "a touch held past max_duration must not classify"
        );
        assert!(
            tracker.finish(POINTER, 0.1, &config).is_none(),
            "the gesture entry must be consumed even when discarded"
        );
    }

    #[test]
    fn unknown_pointer_is_ignored() {
        let mut tracker = SwipeTracker::default();
        tracker.track(POINTER, Vec2::new(10.0, 10.0));
        assert!(tracker.finish(POINTER, 0.1, &default_config()).is_none());
    }

    #[test]
    fn direction_comes_from_the_last_increment() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(POINTER, Vec2::ZERO, 0.0);
        // mostly rightward, but the final increment turns upward
        tracker.track(POINTER, Vec2::new(100.0, 0.0));
        tracker.track(POINTER, Vec2::new(101.0, 80.0));

        let swipe = tracker
            .finish(POINTER, 0.2, &default_config())
            .expect("should classify");

        assert!(swipe.is_up, "final increment points up");
        assert!(!swipe.is_right, "cumulative path must not leak into flags");
    }

    #[test]
    fn diagonal_swipe_reports_both_axes() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(POINTER, Vec2::ZERO, 0.0);
        tracker.track(POINTER, Vec2::new(70.0, 70.0));

        let swipe = tracker
            .finish(POINTER, 0.2, &default_config())
            .expect("should classify");

        assert!(swipe.is_right && swipe.is_up, "diagonal sets both flags");
    }

    #[test]
    fn wide_deadzone_swallows_every_flag() {
        let config = SwipeConfig::new(1.0, 0.8).expect("valid config");
        let mut tracker = SwipeTracker::default();
        tracker.begin(POINTER, Vec2::ZERO, 0.0);
        tracker.track(POINTER, Vec2::new(50.0, 50.0));

        let swipe = tracker
            .finish(POINTER, 0.2, &config)
            .expect("gesture still finalizes");

        assert!(
            !swipe.is_up && !swipe.is_down && !swipe.is_left && !swipe.is_right,
            "components of ~0.707 sit inside a 0.8 deadzone"
        );
    }

    #[test]
    fn stationary_tap_finalizes_with_zero_direction() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(POINTER, Vec2::new(5.0, 5.0), 0.0);

        let swipe = tracker
            .finish(POINTER, 0.1, &default_config())
            .expect("taps still produce a record");

        assert_eq!(swipe.direction, Vec2::ZERO, "no movement means no direction");
        assert!(
            !swipe.is_up && !swipe.is_down && !swipe.is_left && !swipe.is_right,
            "zero direction must trigger nothing"
        );
    }

    #[test]
    fn concurrent_pointers_do_not_interfere() {
        let first = PointerId::Touch(1);
        let second = PointerId::Touch(2);
        let mut tracker = SwipeTracker::default();

        tracker.begin(first, Vec2::ZERO, 0.0);
        tracker.begin(second, Vec2::ZERO, 0.05);
        tracker.track(first, Vec2::new(100.0, 0.0));
        tracker.track(second, Vec2::new(0.0, -100.0));

        let first_swipe = tracker
            .finish(first, 0.2, &default_config())
            .expect("should classify");
        let second_swipe = tracker
            .finish(second, 0.25, &default_config())
            .expect("should classify");

        assert!(first_swipe.is_right && !first_swipe.is_down);
        assert!(second_swipe.is_down && !second_swipe.is_right);
    }

    #[test]
    fn config_rejects_out_of_range_values() {
        assert_eq!(
            SwipeConfig::new(1.0, 1.0),
            Err(SwipeConfigError::DeadzoneOutOfRange(1.0))
        );
        assert_eq!(
            SwipeConfig::new(0.0, 0.3),
            Err(SwipeConfigError::NonPositiveDuration(0.0))
        );
        assert!(SwipeConfig::new(0.5, 0.0).is_ok());
    }
}
