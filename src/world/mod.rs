//! World module - config and level data, and building levels from it.

mod builder;
pub mod data;
mod materials;
mod plugin;

pub use builder::{build_level, LevelGeometry};
pub use data::{CurrentLevel, LevelDefinition, LevelRegistry};
pub use materials::MaterialRegistry;
pub use plugin::{setup_level, WorldPlugin};
