use bevy::prelude::*;

// Easing speed shared by everything that follows a motion target, in 1/s.
const EASE_SPEED: f32 = 10.0;

/// Eases the entity's transform toward `target` every frame. `None` leaves it
/// at rest. Shared by the draggable behavior and the swipe-steered discs.
#[derive(Component, Default, Debug)]
pub struct EaseToTarget {
    pub target: Option<Vec2>,
}

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, ease_toward_target);
    }
}

/// Fraction of the remaining distance covered after `dt` seconds of easing.
/// Exponential decay, so splitting a step into smaller ones lands on the same
/// point regardless of frame rate.
pub(crate) fn ease_fraction(speed: f32, dt: f32) -> f32 {
    1.0 - (-speed * dt).exp()
}

fn ease_toward_target(time: Res<Time>, mut movers: Query<(&mut Transform, &EaseToTarget)>) {
    let fraction = ease_fraction(EASE_SPEED, time.delta_secs());
    for (mut transform, ease) in &mut movers {
        let Some(target) = ease.target else {
            continue;
        };
        let eased = transform.translation.truncate().lerp(target, fraction);
        transform.translation = eased.extend(transform.translation.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_big_step_matches_many_small_ones() {
        let start = Vec2::new(-40.0, 25.0);
        let target = Vec2::new(120.0, -80.0);

        let big = start.lerp(target, ease_fraction(EASE_SPEED, 0.5));

        let mut small = start;
        for _ in 0..50 {
            small = small.lerp(target, ease_fraction(EASE_SPEED, 0.01));
        }

        assert!(
            big.distance(small) < 1e-2,
            "subdivided easing diverged: {big} vs {small}"
        );
    }

    #[test]
    fn easing_never_overshoots() {
        let fraction = ease_fraction(EASE_SPEED, 10.0);
        assert!(
            (0.0..=1.0).contains(&fraction),
            "fraction out of range: {fraction}"
        );
    }
}
