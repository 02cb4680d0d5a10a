//! Combat module - unit attacks, latching, and damage.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{apply_damage, seek_hostiles, strike_hostiles};
