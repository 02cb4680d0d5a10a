//! Seeded randomness for gameplay rolls.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The single source of randomness for latching, shake-offs and spawn scatter.
///
/// Seeded from [`crate::core::SimConfig::seed`] so a run can be replayed.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Roll with probability `p`, clamped to `0.0..=1.0`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.0.gen_bool(f64::from(p.clamp(0.0, 1.0)))
    }

    /// Uniform angle in radians.
    pub fn angle(&mut self) -> f32 {
        self.0.gen_range(0.0..std::f32::consts::TAU)
    }

    /// Uniform point inside a disc of the given radius (XZ plane).
    pub fn point_in_disc(&mut self, radius: f32) -> Vec2 {
        let angle = self.angle();
        let distance = radius * self.0.gen::<f32>().sqrt();
        Vec2::new(angle.cos(), angle.sin()) * distance
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}
