//! Simulation state and tick ordering.
//!
//! States determine which systems run at any given time. Every gameplay
//! system lives in one of the [`SimSet`] stages, and the whole chain only
//! runs while the simulation is [`SimState::Running`].

use bevy::prelude::*;

/// Top-level simulation state.
///
/// `Paused` freezes every gameplay system. Tick timers are only advanced by
/// those systems, so they resume exactly where they stopped.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SimState {
    /// Gameplay ticks every frame
    #[default]
    Running,
    /// Gameplay is frozen but the world stays visible
    Paused,
}

/// Ordered stages of one simulation tick.
///
/// The chain guarantees that topology changes (joins, leaves, anchoring)
/// are fully resolved in `Membership` before anything moves in `Motion`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Player commands turned into events
    Input,
    /// Validation, emergence, landing, settling, thawing
    Lifecycle,
    /// Proximity scans and squad commands
    Perception,
    /// Carrier join/leave protocol and anchor decisions
    Membership,
    /// Load advance, leader following, combat approach
    Motion,
    /// Arrival, strikes, shakes, hazards, damage
    Resolve,
    /// Carriers snap toward their slots, absorption, spawning
    Follow,
    /// Deaths and bookkeeping
    Cleanup,
}
