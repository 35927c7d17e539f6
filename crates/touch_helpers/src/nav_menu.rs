use core::fmt::Display;
use core::marker::PhantomData;

use bevy::color::palettes::css::RED;
use bevy::prelude::*;
use bevy::state::state::FreelyMutableState;
use strum::IntoEnumIterator;

const ENTRY_FONT_SIZE: f32 = 22.0;

/// Persistent column of scene shortcuts in the bottom-left corner, one entry
/// per state variant. The active scene's entry is tinted red.
pub struct NavMenuPlugin<S> {
    _marker: PhantomData<S>,
}

impl<S> Default for NavMenuPlugin<S> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

/// Everything the menu needs from a scene state enum.
pub trait NavScene:
    States + FreelyMutableState + IntoEnumIterator + Display + Copy
{
}

impl<T> NavScene for T where
    T: States + FreelyMutableState + IntoEnumIterator + Display + Copy
{
}

#[derive(Component)]
struct NavEntry<S: NavScene> {
    scene: S,
}

impl<S: NavScene> Plugin for NavMenuPlugin<S> {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_nav_menu::<S>).add_systems(
            Update,
            (handle_nav_entries::<S>, tint_active_entry::<S>),
        );
    }
}

fn spawn_nav_menu<S: NavScene>(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(8.0),
            bottom: Val::Px(8.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            for (index, scene) in S::iter().enumerate() {
                parent
                    .spawn((Button, NavEntry { scene }))
                    .with_child((
                        Text::new(format!("{}. {scene}", index + 1)),
                        TextFont {
                            font_size: ENTRY_FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
            }
        });
}

fn handle_nav_entries<S: NavScene>(
    mut next_state: ResMut<NextState<S>>,
    mut interactions: Query<(&Interaction, &NavEntry<S>), Changed<Interaction>>,
) {
    for (interaction, entry) in &mut interactions {
        if *interaction == Interaction::Pressed {
            info!("switching scene to {}", entry.scene);
            next_state.set(entry.scene);
        }
    }
}

fn tint_active_entry<S: NavScene>(
    state: Res<State<S>>,
    entries: Query<(&NavEntry<S>, &Children)>,
    mut colors: Query<&mut TextColor>,
) {
    if !state.is_changed() {
        return;
    }
    for (entry, children) in &entries {
        for &child in children {
            if let Ok(mut color) = colors.get_mut(child) {
                color.0 = if entry.scene == *state.get() {
                    Color::Srgba(RED)
                } else {
                    Color::WHITE
                };
            }
        }
    }
}
