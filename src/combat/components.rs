//! Combat-related components.

use bevy::prelude::*;

use crate::core::{CombatConfig, TickTimer};

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component, Debug)]
pub struct Dead;

/// Per-unit attack rhythm and latch bookkeeping.
#[derive(Component, Debug, Clone)]
pub struct UnitCombat {
    /// Ticks between hits; starts finished so the first hit lands on contact
    pub cooldown: TickTimer,
    /// How long a latch holds before the unit lets go on its own
    pub latch: TickTimer,
    /// Where on the hostile the unit clings, relative to its centre
    pub latch_offset: Vec3,
}

impl UnitCombat {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            cooldown: TickTimer::finished_after(config.attack_interval),
            latch: TickTimer::new(config.latch_ticks),
            latch_offset: Vec3::ZERO,
        }
    }
}
