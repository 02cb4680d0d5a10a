//! Onion module - delivery points that absorb loads and grow new units.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::OnionPlugin;
