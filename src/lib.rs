//! Pikmin Clone - a squad of small autonomous followers in Bevy.
//!
//! A leader walks around with a squad of units behind them. Units carry
//! loads back to their onion, fight hostiles, and dig up buried treasure.
//! Elemental hazards hurt them (or not) depending on their kind.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Simulation state, tick ordering, config, shared events
//! - **Units**: Unit kinds, capabilities, and the per-unit state machine
//! - **Squad**: Roster, formations, whistle and dismiss
//! - **Carry**: Carryables and the coordinator that moves them
//! - **Combat**: Health, attacking, latching onto hostiles
//! - **Enemies**: Hostile data, patrols and chases, shake-offs, eating, corpses
//! - **Flowers**: Pellet flowers that drop a pellet and grow back
//! - **Treasure**: Buried treasure that has to be found and dug out
//! - **Onion**: Delivery, absorption, and growing new units
//! - **Hazards**: Fire, water, electricity, poison, cold
//! - **Player**: Leader movement and keyboard commands
//! - **World**: Level data and building levels from it
//!
//! [`PikminPlugin`] holds everything that runs without a window, so the
//! simulation can be driven headless with `MinimalPlugins`.

pub mod carry;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod flowers;
pub mod hazards;
pub mod onion;
pub mod player;
pub mod squad;
pub mod treasure;
pub mod units;
pub mod world;

use bevy::prelude::*;

/// The simulation: every plugin that needs no window, input, or assets.
pub struct PikminPlugin;

impl Plugin for PikminPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            .add_plugins(units::UnitPlugin)
            .add_plugins(squad::SquadPlugin)
            .add_plugins(carry::CarryPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(flowers::FlowerPlugin)
            .add_plugins(treasure::TreasurePlugin)
            .add_plugins(onion::OnionPlugin)
            .add_plugins(hazards::HazardPlugin);
    }
}
