//! Pikmin Clone - Entry Point
//!
//! Controls:
//! - W/S: Walk, A/D: Turn
//! - Space: Whistle nearby units into the squad
//! - X: Dismiss the squad
//! - 1-4: Ring, grid, triangle, line formation
//! - E: Call units out of a nearby onion
//! - R: Reload the level
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pikmin Clone".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Simulation
        .add_plugins(pikmin_clone::PikminPlugin)

        // Leader controls and the level
        .add_plugins(pikmin_clone::player::PlayerPlugin)
        .add_plugins(pikmin_clone::world::WorldPlugin)

        .run();
}
