//! Enemies module - hostiles, their reactions to units, and corpses.

mod ai;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{HostileDefinition, HostileRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_hostile;
