//! Global events used for cross-system communication.
//!
//! Subsystem-specific events (carrying, squad commands, onions) live with
//! their modules; these are the ones several plugins share.

use bevy::prelude::*;

/// Sent when an entity takes damage.
///
/// The damage system listens for these and applies the health reduction.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount
    pub amount: f32,
}

/// Sent once when an entity's health reaches 0.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that dealt the final blow (if any)
    pub killed_by: Option<Entity>,
}

/// An airborne unit touched the ground.
///
/// Sent by the built-in ballistic integration, or by an external physics
/// layer that detects the contact itself.
#[derive(Event, Debug, Clone)]
pub struct GroundContact {
    pub unit: Entity,
}
