use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use touch_helpers::input;
use touch_helpers::lifespan::{Lifespan, ShrinkToNothing};

use crate::Scene;

const MARKER_RADIUS: f32 = 16.0;
const MARKER_LIFETIME: f32 = 0.5;

/// Swipe-particles prototype: every pointer movement leaves a shrinking,
/// short-lived circle behind.
pub struct TrailScenePlugin;

impl Plugin for TrailScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnExit(Scene::SwipeParticles), despawn_trail)
            .add_systems(
                Update,
                spawn_trail_markers.run_if(in_state(Scene::SwipeParticles)),
            );
    }
}

#[derive(Component)]
struct TrailMarker;

fn spawn_trail_markers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    button_input: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
) {
    for (_, position) in
        input::moved_pointers(&button_input, &mouse_motion, &touch_input, &windows)
    {
        let Some(world_position) = input::screen_to_world(position, &camera) else {
            continue;
        };
        commands.spawn((
            Mesh2d(meshes.add(Circle::new(MARKER_RADIUS))),
            MeshMaterial2d(materials.add(ColorMaterial::from(Color::WHITE))),
            Transform::from_translation(world_position.extend(0.0)),
            Lifespan::new(MARKER_LIFETIME),
            ShrinkToNothing,
            TrailMarker,
        ));
    }
}

fn despawn_trail(mut commands: Commands, markers: Query<Entity, With<TrailMarker>>) {
    for entity in &markers {
        commands.entity(entity).despawn_recursive();
    }
}
