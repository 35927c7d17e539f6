use bevy::prelude::*;

/// Despawns the entity once the timer runs out. Used for every transient
/// visual in the prototypes (gesture markers, trail particles, slot flashes).
#[derive(Component)]
pub struct Lifespan {
    timer: Timer,
}

impl Lifespan {
    pub fn new(seconds: f32) -> Self {
        Self {
            timer: Timer::from_seconds(seconds, TimerMode::Once),
        }
    }
}

/// Scales the entity down to nothing over its lifespan.
#[derive(Component, Default)]
pub struct ShrinkToNothing;

pub struct LifespanPlugin;

impl Plugin for LifespanPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (tick_lifespans, shrink_over_lifespan));
    }
}

fn tick_lifespans(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Lifespan)>,
) {
    for (entity, mut lifespan) in &mut query {
        if lifespan.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

fn shrink_over_lifespan(mut query: Query<(&Lifespan, &mut Transform), With<ShrinkToNothing>>) {
    for (lifespan, mut transform) in &mut query {
        transform.scale = Vec3::splat(1.0 - lifespan.timer.fraction());
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_systems(Update, (tick_lifespans, shrink_over_lifespan));
        app
    }

    fn advance(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    #[test]
    fn entity_outlives_short_ticks_and_dies_at_expiry() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn((Transform::default(), Lifespan::new(1.0)))
            .id();

        advance(&mut app, 0.5);
        assert!(
            app.world().get_entity(entity).is_ok(),
            "entity despawned before its lifespan elapsed"
        );

        advance(&mut app, 0.6);
        assert!(
            app.world().get_entity(entity).is_err(),
            "entity survived past its lifespan"
        );
    }

    #[test]
    fn shrinking_entity_scales_toward_zero() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn((Transform::default(), Lifespan::new(1.0), ShrinkToNothing))
            .id();

        advance(&mut app, 0.25);
        let scale = app
            .world()
            .get::<Transform>(entity)
            .expect("marker should still exist")
            .scale;
        assert!(
            (scale.x - 0.75).abs() < 1e-3,
            "expected scale ~0.75, got {scale}"
        );
    }
}
