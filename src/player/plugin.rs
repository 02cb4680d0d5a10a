//! Player plugin - movement, camera, and keyboard commands.

use bevy::prelude::*;

use super::commands;
use super::components::*;
use super::movement;

/// Player plugin - handles player movement and turning keys into squad commands.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Initialize resources
        app.init_resource::<PlayerConfig>();

        movement::setup_movement_systems(app);
        commands::setup_command_systems(app);
    }
}
