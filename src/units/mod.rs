//! Units module - the autonomous followers, their capabilities and state machine.

mod capabilities;
mod components;
mod plugin;
mod spawning;
mod systems;

pub use capabilities::*;
pub use components::*;
pub use plugin::UnitPlugin;
pub use spawning::{emerging_unit_bundle, unit_bundle};
