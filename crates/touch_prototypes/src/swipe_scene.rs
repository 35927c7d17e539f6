use bevy::color::palettes::css::TURQUOISE;
use bevy::prelude::*;
use touch_helpers::motion::EaseToTarget;
use touch_helpers::swipe::{SwipeConfig, SwipeEvent};

use crate::Scene;

const DISC_RADIUS: f32 = 32.0;
// distance a qualifying swipe moves the disc
const SWIPE_STEP: f32 = 64.0;
const SHAKE_STRENGTH: f32 = 10.0;
const SHAKE_DECAY: f32 = 40.0;

/// Swipe-directional prototype: left/right swipes step a disc sideways, a
/// downward swipe shakes the camera.
pub struct SwipeScenePlugin;

impl Plugin for SwipeScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenShake>()
            .add_systems(
                OnEnter(Scene::SwipeDirectional),
                (spawn_scene, show_gesture_markers),
            )
            .add_systems(
                OnExit(Scene::SwipeDirectional),
                (despawn_scene, settle_camera, hide_gesture_markers),
            )
            .add_systems(
                Update,
                (steer_by_swipes, apply_screen_shake).run_if(in_state(Scene::SwipeDirectional)),
            );
    }
}

#[derive(Component)]
struct SwipeSceneElement;

#[derive(Component)]
struct SwipeDisc;

/// Remaining shake amplitude in pixels, decaying toward zero.
#[derive(Resource, Default)]
struct ScreenShake {
    amplitude: f32,
}

fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((
        Mesh2d(meshes.add(Circle::new(DISC_RADIUS))),
        MeshMaterial2d(materials.add(ColorMaterial::from(Color::Srgba(TURQUOISE)))),
        Transform::from_xyz(0.0, 0.0, 10.0),
        EaseToTarget::default(),
        SwipeDisc,
        SwipeSceneElement,
    ));
}

// this scene is the one place gesture endpoints are worth seeing
fn show_gesture_markers(mut config: ResMut<SwipeConfig>) {
    config.debug_markers = true;
}

fn hide_gesture_markers(mut config: ResMut<SwipeConfig>) {
    config.debug_markers = false;
}

fn despawn_scene(mut commands: Commands, elements: Query<Entity, With<SwipeSceneElement>>) {
    for entity in &elements {
        commands.entity(entity).despawn_recursive();
    }
}

fn steer_by_swipes(
    mut swipes: EventReader<SwipeEvent>,
    mut shake: ResMut<ScreenShake>,
    mut discs: Query<(&Transform, &mut EaseToTarget), With<SwipeDisc>>,
) {
    for SwipeEvent(swipe) in swipes.read() {
        for (transform, mut ease) in &mut discs {
            let position = transform.translation.truncate();
            if swipe.is_left {
                ease.target = Some(position + Vec2::new(-SWIPE_STEP, 0.0));
            }
            if swipe.is_right {
                ease.target = Some(position + Vec2::new(SWIPE_STEP, 0.0));
            }
        }
        if swipe.is_down {
            shake.amplitude = SHAKE_STRENGTH;
        }
    }
}

fn apply_screen_shake(
    time: Res<Time>,
    mut shake: ResMut<ScreenShake>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut transform) = camera.get_single_mut() else {
        return;
    };
    if shake.amplitude <= 0.0 {
        return;
    }
    shake.amplitude = (shake.amplitude - SHAKE_DECAY * time.delta_secs()).max(0.0);
    if shake.amplitude <= f32::EPSILON {
        shake.amplitude = 0.0;
        transform.translation = Vec3::new(0.0, 0.0, transform.translation.z);
        return;
    }

    let offset = Vec2::new(
        fastrand::f32().mul_add(2.0, -1.0),
        fastrand::f32().mul_add(2.0, -1.0),
    ) * shake.amplitude;
    transform.translation = offset.extend(transform.translation.z);
}

fn settle_camera(
    mut shake: ResMut<ScreenShake>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    shake.amplitude = 0.0;
    if let Ok(mut transform) = camera.get_single_mut() {
        transform.translation = Vec3::new(0.0, 0.0, transform.translation.z);
    }
}
