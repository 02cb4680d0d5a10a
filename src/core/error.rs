//! Error types for data loading and entity configuration.

use bevy::prelude::*;
use thiserror::Error;

/// Errors that can occur when loading config or level data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// An entity was spawned without something it needs to take part in the simulation.
///
/// These are detected once, when the entity's components are added, and the
/// entity is parked with a [`Misconfigured`] marker instead of crashing the tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unit has no Health")]
    UnitWithoutHealth,

    #[error("hostile has no Health")]
    HostileWithoutHealth,

    #[error("carryable weight must be a positive finite number, got {0}")]
    InvalidWeight(f32),

    #[error("onion capacity must be at least 1")]
    ZeroOnionCapacity,
}

/// Marks an entity whose configuration was rejected; every gameplay query skips it.
#[derive(Component, Debug, Clone)]
pub struct Misconfigured(pub ConfigError);
