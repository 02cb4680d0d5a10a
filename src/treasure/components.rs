//! Buried treasure components.

use bevy::prelude::*;

use crate::carry::{carryable_bundle, CarryKind};
use crate::core::{TickTimer, TreasureConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Excavation {
    /// Nobody has found it yet
    Hidden,
    /// Found; diggers can work on it
    Revealed { progress: f32 },
    /// Dug out and coming up
    Rising(TickTimer),
}

/// A load still under the ground.
///
/// Carriers ignore it until a treasure-finding unit has revealed it, diggers
/// have done enough work on it, and it has risen to the surface.
#[derive(Component, Debug, Clone)]
pub struct Buried {
    stage: Excavation,
    /// Dig work needed before it starts rising
    pub work: f32,
    pub depth: f32,
    /// Height it ends up at once dug out
    pub surface_height: f32,
}

impl Buried {
    pub fn new(surface_height: f32, config: &TreasureConfig) -> Self {
        Self {
            stage: Excavation::Hidden,
            work: config.dig_work,
            depth: config.buried_depth,
            surface_height,
        }
    }

    pub fn stage(&self) -> Excavation {
        self.stage
    }

    pub fn is_revealed(&self) -> bool {
        self.stage != Excavation::Hidden
    }

    pub fn accepts_diggers(&self) -> bool {
        matches!(self.stage, Excavation::Revealed { .. })
    }

    /// Mark it found. Returns true the first time only.
    pub fn reveal(&mut self) -> bool {
        if self.stage != Excavation::Hidden {
            return false;
        }
        self.stage = Excavation::Revealed { progress: 0.0 };
        true
    }

    /// Add dig work. Returns true when this finishes the dig and the rise begins.
    pub fn dig(&mut self, amount: f32, rise_ticks: u32) -> bool {
        let Excavation::Revealed { progress } = &mut self.stage else {
            return false;
        };
        *progress += amount.max(0.0);
        if *progress < self.work {
            return false;
        }
        self.stage = Excavation::Rising(TickTimer::new(rise_ticks));
        true
    }

    /// Advance the rise. Returns the height to sit at and whether it has
    /// surfaced, or `None` if it isn't rising.
    pub(crate) fn tick_rise(&mut self) -> Option<(f32, bool)> {
        let Excavation::Rising(timer) = &mut self.stage else {
            return None;
        };
        let surfaced = timer.tick();
        let height = self.surface_height - self.depth * (1.0 - timer.fraction());
        Some((height, surfaced))
    }
}

/// A found treasure was pointed out by a unit.
#[derive(Event, Debug, Clone, Copy)]
pub struct TreasureRevealed {
    pub carryable: Entity,
    pub finder: Entity,
}

/// Digging finished; the load is on its way up.
#[derive(Event, Debug, Clone, Copy)]
pub struct TreasureExcavated {
    pub carryable: Entity,
}

/// Components for a treasure buried under `position`.
pub fn buried_treasure_bundle(
    weight: f32,
    value: u32,
    position: Vec3,
    config: &TreasureConfig,
) -> impl Bundle {
    (
        carryable_bundle(
            weight,
            CarryKind::Treasure { value },
            position - Vec3::Y * config.buried_depth,
        ),
        Buried::new(position.y, config),
    )
}
