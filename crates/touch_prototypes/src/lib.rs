use bevy::prelude::*;
use strum::{Display, EnumIter};
use touch_helpers::grabbing::GrabbingPlugin;
use touch_helpers::lifespan::LifespanPlugin;
use touch_helpers::motion::MotionPlugin;
use touch_helpers::nav_menu::NavMenuPlugin;
use touch_helpers::swipe::SwipePlugin;

mod grabbing_scene;
mod swipe_scene;
mod trail_scene;

#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "title_case")]
enum Scene {
    #[default]
    SwipeDirectional,
    Grabbing,
    SwipeParticles,
}

pub fn run() {
    touch_helpers::get_default_app(env!("CARGO_PKG_NAME"))
        .init_state::<Scene>()
        .add_plugins((
            MotionPlugin,
            SwipePlugin,
            GrabbingPlugin,
            LifespanPlugin,
            NavMenuPlugin::<Scene>::default(),
        ))
        .add_plugins((
            grabbing_scene::GrabbingScenePlugin,
            swipe_scene::SwipeScenePlugin,
            trail_scene::TrailScenePlugin,
        ))
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
