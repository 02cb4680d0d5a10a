//! Pellet flowers - units knock them down for a pellet, and they grow back.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::FlowerPlugin;
