use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

/// Identity of one contact point. The left mouse button doubles as a pointer
/// so every prototype stays playable on desktop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Pointers that began this frame, with their screen position.
pub fn just_pressed_pointers(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Vec<(PointerId, Vec2)> {
    let mut pointers = Vec::new();
    if button_input.just_pressed(MouseButton::Left) {
        if let Some(cursor_position) = windows.single().cursor_position() {
            pointers.push((PointerId::Mouse, cursor_position));
        }
    }
    for touch in touch_input.iter_just_pressed() {
        pointers.push((PointerId::Touch(touch.id()), touch.position()));
    }
    pointers
}

/// Pointers that ended this frame, with their final screen position.
pub fn just_released_pointers(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Vec<(PointerId, Vec2)> {
    let mut pointers = Vec::new();
    if button_input.just_released(MouseButton::Left) {
        if let Some(cursor_position) = windows.single().cursor_position() {
            pointers.push((PointerId::Mouse, cursor_position));
        }
    }
    for touch in touch_input.iter_just_released() {
        pointers.push((PointerId::Touch(touch.id()), touch.position()));
    }
    pointers
}

/// Every in-progress pointer, whether it moved this frame or not.
pub fn active_pointers(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Vec<(PointerId, Vec2)> {
    let mut pointers = Vec::new();
    if button_input.pressed(MouseButton::Left) {
        if let Some(cursor_position) = windows.single().cursor_position() {
            pointers.push((PointerId::Mouse, cursor_position));
        }
    }
    for touch in touch_input.iter() {
        pointers.push((PointerId::Touch(touch.id()), touch.position()));
    }
    pointers
}

/// In-progress pointers that actually moved this frame.
pub fn moved_pointers(
    button_input: &Res<ButtonInput<MouseButton>>,
    mouse_motion: &Res<AccumulatedMouseMotion>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Vec<(PointerId, Vec2)> {
    let mut pointers = Vec::new();
    if button_input.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        if let Some(cursor_position) = windows.single().cursor_position() {
            pointers.push((PointerId::Mouse, cursor_position));
        }
    }
    for touch in touch_input.iter() {
        if touch.delta() != Vec2::ZERO {
            pointers.push((PointerId::Touch(touch.id()), touch.position()));
        }
    }
    pointers
}

/// Converts a viewport position into 2D world space through the scene camera.
pub fn screen_to_world(
    position: Vec2,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.single();

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}
