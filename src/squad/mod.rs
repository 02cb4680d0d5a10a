//! Squad module - the roster of units following the leader and their formation.

mod formation;
mod plugin;
mod roster;
mod systems;

pub use formation::*;
pub use plugin::SquadPlugin;
pub use roster::SquadManager;
pub use systems::{handle_whistle, ChangeFormation, DismissSquad, Leader, Recalled, Whistle};
