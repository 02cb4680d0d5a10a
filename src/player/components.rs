//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity. The player is also the squad's leader.
#[derive(Component)]
pub struct Player;

/// Marker for the camera trailing the player.
#[derive(Component)]
pub struct PlayerCamera;

/// Configuration for the player controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Movement speed in units per second
    pub move_speed: f32,
    /// Turn speed in radians per second
    pub turn_speed: f32,
    /// Gravity applied through the character controller, units per second
    pub fall_speed: f32,
    /// How many units one spawn request asks the nearest onion for
    pub spawn_batch: u32,
    /// Maximum distance to an onion for a spawn request
    pub onion_reach: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            turn_speed: 2.5,
            fall_speed: 9.0,
            spawn_batch: 5,
            onion_reach: 4.0,
        }
    }
}
