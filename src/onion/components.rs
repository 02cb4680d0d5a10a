//! Onion components.

use bevy::prelude::*;

use crate::carry::CarryKind;
use crate::core::{ConfigError, OnionConfig, TickTimer};
use crate::units::UnitKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnionState {
    /// Underground until the leader walks close
    Buried,
    /// Coming up out of the ground
    Rising(TickTimer),
    /// Accepts loads and releases units
    Active,
}

/// A delivery point. Stores units grown from delivered loads and lets them
/// out again on request.
#[derive(Component, Debug, Clone)]
pub struct Onion {
    pub kind: UnitKind,
    state: OnionState,
    stored: u32,
    capacity: u32,
    queued: u32,
    cooldown: TickTimer,
    /// Units currently rising out of the ground next to this onion
    pub(crate) emerging: Vec<Entity>,
    /// Height of the onion once fully risen
    pub surface_height: f32,
}

impl Onion {
    pub fn new(kind: UnitKind, capacity: u32, surface_height: f32, config: &OnionConfig) -> Self {
        Self {
            kind,
            state: OnionState::Buried,
            stored: 0,
            capacity,
            queued: 0,
            cooldown: TickTimer::finished_after(config.spawn_cooldown),
            emerging: Vec::new(),
            surface_height,
        }
    }

    /// An onion that starts above ground.
    pub fn active(kind: UnitKind, capacity: u32, surface_height: f32, config: &OnionConfig) -> Self {
        Self {
            state: OnionState::Active,
            ..Self::new(kind, capacity, surface_height, config)
        }
    }

    pub fn with_stored(mut self, stored: u32) -> Self {
        self.stored = stored.min(self.capacity);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            Err(ConfigError::ZeroOnionCapacity)
        } else {
            Ok(())
        }
    }

    pub fn state(&self) -> OnionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == OnionState::Active
    }

    pub fn is_full(&self) -> bool {
        self.stored >= self.capacity
    }

    pub fn stored(&self) -> u32 {
        self.stored
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn queued(&self) -> u32 {
        self.queued
    }

    /// Start rising. Only a buried onion can be activated.
    pub fn activate(&mut self, rise_ticks: u32) -> bool {
        if self.state != OnionState::Buried {
            return false;
        }
        self.state = OnionState::Rising(TickTimer::new(rise_ticks));
        true
    }

    /// Advance the rise. Returns the eased progress, or `None` if not rising.
    pub(crate) fn tick_rise(&mut self) -> Option<f32> {
        let OnionState::Rising(mut timer) = self.state else {
            return None;
        };
        let done = timer.tick();
        let t = timer.fraction();
        self.state = if done {
            OnionState::Active
        } else {
            OnionState::Rising(timer)
        };
        Some(1.0 - (1.0 - t).powi(3))
    }

    /// Accept an arriving load. Refused while inactive, full, or for loads
    /// that don't turn into units.
    pub fn receive(&mut self, kind: &CarryKind) -> bool {
        self.is_active() && kind.yields_units() && !self.is_full()
    }

    /// Add units to storage, capped. Returns how many fit.
    pub fn store(&mut self, count: u32) -> u32 {
        let added = count.min(self.capacity - self.stored.min(self.capacity));
        self.stored += added;
        added
    }

    /// Move up to `count` stored units into the spawn queue. Returns how many were queued.
    pub fn request_spawn(&mut self, count: u32) -> u32 {
        let queued = count.min(self.stored);
        self.stored -= queued;
        self.queued += queued;
        queued
    }

    /// Whether the next queued unit may come out this tick.
    pub(crate) fn tick_spawn(&mut self, max_active_spawns: usize) -> bool {
        self.cooldown.tick();
        self.is_active()
            && self.queued > 0
            && self.cooldown.finished()
            && self.emerging.len() < max_active_spawns
    }

    pub(crate) fn spawned(&mut self, unit: Entity) {
        self.queued = self.queued.saturating_sub(1);
        self.emerging.push(unit);
        self.cooldown.reset();
    }
}

/// A delivered load being drawn into its onion.
#[derive(Component, Debug, Clone)]
pub struct Absorbing {
    pub onion: Entity,
    pub from: Vec3,
    pub timer: TickTimer,
}

impl Absorbing {
    pub fn new(onion: Entity, from: Vec3, ticks: u32) -> Self {
        Self {
            onion,
            from,
            timer: TickTimer::new(ticks),
        }
    }
}

/// Ask an onion to release stored units.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnRequest {
    pub onion: Entity,
    pub count: u32,
}

/// A load finished absorbing; `added` units went into storage.
#[derive(Event, Debug, Clone, Copy)]
pub struct LoadAbsorbed {
    pub onion: Entity,
    pub carryable: Entity,
    pub added: u32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct OnionActivated {
    pub onion: Entity,
}

/// Components for an onion whose surface position is `position`.
///
/// A buried onion starts `buried_depth` below it.
pub fn onion_bundle(
    kind: UnitKind,
    position: Vec3,
    capacity: u32,
    buried: bool,
    config: &OnionConfig,
) -> (Onion, Transform) {
    let (onion, translation) = if buried {
        (
            Onion::new(kind, capacity, position.y, config),
            position - Vec3::Y * config.buried_depth,
        )
    } else {
        (Onion::active(kind, capacity, position.y, config), position)
    };
    (onion, Transform::from_translation(translation))
}
