//! Pellet flower components.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::TickTimer;
use crate::enemies::Hostile;

/// Name flowers go by while units can attack them.
pub const FLOWER_NAME: &str = "Pellet Flower";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bloom {
    /// Holding a pellet; units attack it
    Blooming,
    /// Knocked down, growing back
    Regrowing(TickTimer),
}

/// Holds a pellet until units knock it down, then grows back.
///
/// A blooming flower is a [`Hostile`] with [`Health`], so units fight it
/// like anything else.
#[derive(Component, Debug, Clone)]
pub struct PelletFlower {
    pub pellet_weight: f32,
    pub pellet_value: u32,
    pub health: f32,
    pub regrow_ticks: u32,
    bloom: Bloom,
}

impl PelletFlower {
    pub fn new(pellet_weight: f32, pellet_value: u32, health: f32, regrow_ticks: u32) -> Self {
        Self {
            pellet_weight,
            pellet_value,
            health,
            regrow_ticks,
            bloom: Bloom::Blooming,
        }
    }

    pub fn bloom(&self) -> Bloom {
        self.bloom
    }

    pub fn is_blooming(&self) -> bool {
        self.bloom == Bloom::Blooming
    }

    pub(crate) fn wilt(&mut self) {
        self.bloom = Bloom::Regrowing(TickTimer::new(self.regrow_ticks));
    }

    /// Advance regrowth. Returns how far it has grown back and whether it
    /// bloomed this tick, or `None` while blooming.
    pub(crate) fn tick_regrow(&mut self) -> Option<(f32, bool)> {
        let Bloom::Regrowing(timer) = &mut self.bloom else {
            return None;
        };
        let bloomed = timer.tick();
        let grown = timer.fraction();
        if bloomed {
            self.bloom = Bloom::Blooming;
        }
        Some((grown, bloomed))
    }

    /// What a blooming flower needs to be attacked.
    pub(crate) fn blooming_parts(&self) -> (Hostile, Health) {
        (
            Hostile {
                name: FLOWER_NAME.to_string(),
            },
            Health::new(self.health),
        )
    }
}

/// A knocked-down flower dropped its pellet.
#[derive(Event, Debug, Clone, Copy)]
pub struct PelletDropped {
    pub flower: Entity,
    pub pellet: Entity,
}

/// Components for a blooming flower at `position`.
pub fn pellet_flower_bundle(flower: PelletFlower, position: Vec3) -> impl Bundle {
    (
        flower.blooming_parts(),
        flower,
        Transform::from_translation(position),
    )
}
