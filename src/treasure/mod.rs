//! Buried treasure - loads that have to be found and dug out before they
//! can be carried.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::TreasurePlugin;
