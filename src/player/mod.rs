//! Player module - the leader entity, its controller, and keyboard commands.

mod commands;
mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
