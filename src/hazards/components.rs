//! Hazard components.

use bevy::prelude::*;

use crate::units::HazardKind;

/// A circular elemental zone on the ground.
///
/// Give it a [`crate::combat::Health`] to let neutralizing units wear it down.
#[derive(Component, Debug, Clone)]
pub struct Hazard {
    pub kind: HazardKind,
    pub radius: f32,
    /// Damage dealt each tick to every non-resistant unit inside
    pub damage_per_tick: f32,
    /// Damage each neutralizing unit inside deals to the hazard per tick
    pub neutralize_per_tick: f32,
}

impl Hazard {
    pub fn new(kind: HazardKind, radius: f32) -> Self {
        Self {
            kind,
            radius,
            damage_per_tick: 0.05,
            neutralize_per_tick: 0.1,
        }
    }

    /// Cold freezes instead of damaging.
    pub fn freezes(&self) -> bool {
        self.kind == HazardKind::Cold
    }
}

/// A unit was frozen by a cold hazard.
#[derive(Event, Debug, Clone, Copy)]
pub struct UnitFrozen {
    pub unit: Entity,
    pub hazard: Entity,
}
