use bevy::prelude::*;
use bevy::utils::HashSet;

use crate::input::{self, PointerId};
use crate::motion::EaseToTarget;

/// Exclusive ownership of the one object a pointer may hold. Shared by every
/// draggable in the scene; the first successful grab wins and later attempts
/// are ignored until release.
#[derive(Resource, Default)]
pub struct GrabSession {
    held: Option<(Entity, PointerId)>,
}

impl GrabSession {
    pub fn grab(&mut self, entity: Entity, pointer: PointerId) {
        self.held = Some((entity, pointer));
    }

    pub fn release(&mut self) {
        self.held = None;
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    pub fn is_held_by(&self, entity: Entity) -> bool {
        self.held.is_some_and(|(held, _)| held == entity)
    }

    pub fn held(&self) -> Option<(Entity, PointerId)> {
        self.held
    }
}

/// A draggable object. `size` is both its hit area and its overlap bounds.
#[derive(Component)]
#[require(EaseToTarget)]
pub struct Grabbable {
    pub size: Vec2,
}

impl Grabbable {
    pub const fn new(size: Vec2) -> Self {
        Self { size }
    }
}

/// A snap target holding at most one draggable at a time. An occupied slot
/// never reassigns; it frees itself when its occupant's overlap ends.
#[derive(Component)]
pub struct Slot {
    pub size: Vec2,
    occupant: Option<Entity>,
}

impl Slot {
    pub const fn new(size: Vec2) -> Self {
        Self {
            size,
            occupant: None,
        }
    }

    pub const fn occupant(&self) -> Option<Entity> {
        self.occupant
    }
}

/// Fired every time a slot claims an occupant.
#[derive(Event, Clone, Copy, Debug)]
pub struct SlotPlaced {
    pub slot: Entity,
    pub occupant: Entity,
}

/// Slot/grabbable pairs that overlapped last frame, for begin/end edges.
#[derive(Resource, Default)]
struct ActiveOverlaps(HashSet<(Entity, Entity)>);

pub struct GrabbingPlugin;

impl Plugin for GrabbingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GrabSession>()
            .init_resource::<ActiveOverlaps>()
            .add_event::<SlotPlaced>()
            .add_systems(
                Update,
                (begin_grab, drag_grabbed, release_grab, track_slot_occupancy).chain(),
            );
    }
}

fn bounds_around(transform: &Transform, size: Vec2) -> Rect {
    Rect::from_center_size(transform.translation.truncate(), size)
}

/// Picks the closest slot a dropped object may snap to: it must overlap the
/// object and must not be occupied by a different entity. Equal distances
/// keep the earliest candidate.
fn nearest_open_slot(
    object: Entity,
    object_rect: Rect,
    slots: &[(Entity, Vec2, Vec2, Option<Entity>)],
) -> Option<(Entity, Vec2)> {
    let mut closest = None;
    let mut closest_distance = f32::MAX;

    for &(slot, center, size, occupant) in slots {
        if occupant.is_some_and(|held| held != object) {
            continue;
        }
        if object_rect
            .intersect(Rect::from_center_size(center, size))
            .is_empty()
        {
            continue;
        }
        let distance = object_rect.center().distance(center);
        if distance < closest_distance {
            closest_distance = distance;
            closest = Some((slot, center));
        }
    }

    closest
}

fn begin_grab(
    mut session: ResMut<GrabSession>,
    button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    grabbables: Query<(Entity, &Transform, &Grabbable)>,
) {
    for (pointer, position) in input::just_pressed_pointers(&button_input, &touch_input, &windows)
    {
        // first successful grab wins, no queueing
        if session.is_held() {
            continue;
        }
        let Some(world_position) = input::screen_to_world(position, &camera) else {
            continue;
        };
        for (entity, transform, grabbable) in &grabbables {
            if bounds_around(transform, grabbable.size).contains(world_position) {
                session.grab(entity, pointer);
                debug!("{entity} grabbed by {pointer:?}");
                break;
            }
        }
    }
}

fn drag_grabbed(
    session: Res<GrabSession>,
    button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut grabbables: Query<&mut EaseToTarget, With<Grabbable>>,
) {
    let Some((entity, pointer)) = session.held() else {
        return;
    };
    for (active, position) in input::active_pointers(&button_input, &touch_input, &windows) {
        if active != pointer {
            continue;
        }
        let Some(world_position) = input::screen_to_world(position, &camera) else {
            break;
        };
        if let Ok(mut ease) = grabbables.get_mut(entity) {
            ease.target = Some(world_position);
        }
        break;
    }
}

fn release_grab(
    mut session: ResMut<GrabSession>,
    mut placed: EventWriter<SlotPlaced>,
    button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut grabbables: Query<(&Transform, &Grabbable, &mut EaseToTarget)>,
    mut slots: Query<(Entity, &Transform, &mut Slot)>,
) {
    let Some((entity, pointer)) = session.held() else {
        return;
    };
    for (released, position) in
        input::just_released_pointers(&button_input, &touch_input, &windows)
    {
        if released != pointer {
            continue;
        }
        session.release();

        let Ok((transform, grabbable, mut ease)) = grabbables.get_mut(entity) else {
            break;
        };
        let object_rect = bounds_around(transform, grabbable.size);
        let candidates: Vec<_> = slots
            .iter()
            .map(|(slot, slot_transform, slot_state)| {
                (
                    slot,
                    slot_transform.translation.truncate(),
                    slot_state.size,
                    slot_state.occupant(),
                )
            })
            .collect();

        if let Some((slot_entity, center)) = nearest_open_slot(entity, object_rect, &candidates) {
            ease.target = Some(center);
            if let Ok((_, _, mut slot)) = slots.get_mut(slot_entity) {
                if slot.occupant != Some(entity) {
                    slot.occupant = Some(entity);
                    info!("{slot_entity} claimed {entity} on drop");
                    placed.send(SlotPlaced {
                        slot: slot_entity,
                        occupant: entity,
                    });
                }
            }
        } else if let Some(world_position) = input::screen_to_world(position, &camera) {
            // no eligible slot: the object stays where it was dropped
            ease.target = Some(world_position);
        }
        break;
    }
}

/// Rect-overlap begin/end edges between slots and draggables drive the
/// occupancy protocol. The held object is invisible to slots until dropped,
/// so it can cross slot regions freely and picking an occupant up frees its
/// slot.
fn track_slot_occupancy(
    session: Res<GrabSession>,
    mut overlaps: ResMut<ActiveOverlaps>,
    mut placed: EventWriter<SlotPlaced>,
    grabbables: Query<(Entity, &Transform, &Grabbable)>,
    mut slots: Query<(Entity, &Transform, &mut Slot)>,
) {
    let object_rects: Vec<(Entity, Rect)> = grabbables
        .iter()
        .filter(|(entity, ..)| !session.is_held_by(*entity))
        .map(|(entity, transform, grabbable)| (entity, bounds_around(transform, grabbable.size)))
        .collect();

    // objects already resting in some slot never get claimed twice
    let mut claimed: HashSet<Entity> = slots
        .iter()
        .filter_map(|(.., slot)| slot.occupant())
        .collect();

    let mut current = HashSet::new();
    for (slot_entity, slot_transform, mut slot) in &mut slots {
        let slot_rect = bounds_around(slot_transform, slot.size);

        for &(object, object_rect) in &object_rects {
            if slot_rect.intersect(object_rect).is_empty() {
                continue;
            }
            current.insert((slot_entity, object));

            let began = !overlaps.0.contains(&(slot_entity, object));
            if began && slot.occupant.is_none() && !claimed.contains(&object) {
                slot.occupant = Some(object);
                claimed.insert(object);
                info!("{slot_entity} claimed {object}");
                placed.send(SlotPlaced {
                    slot: slot_entity,
                    occupant: object,
                });
            }
        }

        if let Some(occupant) = slot.occupant {
            if !current.contains(&(slot_entity, occupant)) {
                slot.occupant = None;
            }
        }
    }
    overlaps.0 = current;
}
