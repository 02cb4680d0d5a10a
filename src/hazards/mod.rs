//! Hazards module - elemental zones that hurt or freeze units.
//!
//! Hazards do the checking: a unit is only ever tested against zones it is
//! standing in, using the pure [`crate::units::Capabilities`] predicates.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::HazardPlugin;
