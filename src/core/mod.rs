//! Core simulation module - states, tick ordering, config, and shared events.
//!
//! This module provides the foundation that every gameplay plugin builds upon.

mod config;
mod error;
mod events;
mod motion;
mod plugin;
mod rng;
mod states;
mod timer;

pub use config::*;
pub use error::{ConfigError, DataLoadError, Misconfigured};
pub use events::*;
pub use motion::*;
pub use plugin::{CorePlugin, SimTick};
pub use rng::SimRng;
pub use states::*;
pub use timer::TickTimer;
