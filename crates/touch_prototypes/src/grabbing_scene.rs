use bevy::color::palettes::css::{GREEN, ORANGE};
use bevy::prelude::*;
use touch_helpers::grabbing::{Grabbable, Slot, SlotPlaced};
use touch_helpers::lifespan::{Lifespan, ShrinkToNothing};
use touch_helpers::WINDOW_HEIGHT;

use crate::Scene;

const DISC_RADIUS: f32 = 32.0;
const SLOT_SIZE: f32 = 80.0;
const SLOT_OUTLINE: f32 = 4.0;
const SLOT_ROW_Y: f32 = WINDOW_HEIGHT * 0.3;
const FLASH_LIFETIME: f32 = 0.4;

/// Grab-and-drop prototype: one draggable disc, three snap slots above it.
pub struct GrabbingScenePlugin;

impl Plugin for GrabbingScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Scene::Grabbing), spawn_scene)
            .add_systems(OnExit(Scene::Grabbing), despawn_scene)
            .add_systems(
                Update,
                flash_placements.run_if(in_state(Scene::Grabbing)),
            );
    }
}

#[derive(Component)]
struct GrabbingSceneElement;

fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // the draggable disc
    commands.spawn((
        Mesh2d(meshes.add(Circle::new(DISC_RADIUS))),
        MeshMaterial2d(materials.add(ColorMaterial::from(Color::Srgba(ORANGE)))),
        Transform::from_xyz(0.0, 0.0, 10.0),
        Grabbable::new(Vec2::splat(DISC_RADIUS * 2.0)),
        GrabbingSceneElement,
    ));

    // three snap slots drawn as outlined squares; registration order matters
    // for the equidistant tie-break (center, then left, then right)
    for x in [0.0, -120.0, 120.0] {
        commands
            .spawn((
                Sprite::from_color(Color::WHITE, Vec2::splat(SLOT_SIZE)),
                Transform::from_xyz(x, SLOT_ROW_Y, 0.0),
                Slot::new(Vec2::splat(SLOT_SIZE)),
                GrabbingSceneElement,
            ))
            .with_child((
                Sprite::from_color(Color::BLACK, Vec2::splat(SLOT_SIZE - SLOT_OUTLINE * 2.0)),
                Transform::from_xyz(0.0, 0.0, 1.0),
            ));
    }
}

fn despawn_scene(mut commands: Commands, elements: Query<Entity, With<GrabbingSceneElement>>) {
    for entity in &elements {
        commands.entity(entity).despawn_recursive();
    }
}

/// Brief green flash over a slot whenever it claims an occupant.
fn flash_placements(
    mut commands: Commands,
    mut placements: EventReader<SlotPlaced>,
    slots: Query<&Transform, With<Slot>>,
) {
    for placement in placements.read() {
        let Ok(transform) = slots.get(placement.slot) else {
            continue;
        };
        commands.spawn((
            Sprite::from_color(
                Color::Srgba(GREEN.with_alpha(0.6)),
                Vec2::splat(SLOT_SIZE),
            ),
            Transform::from_translation(transform.translation.truncate().extend(5.0)),
            Lifespan::new(FLASH_LIFETIME),
            ShrinkToNothing,
            GrabbingSceneElement,
        ));
    }
}
