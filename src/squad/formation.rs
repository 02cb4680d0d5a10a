//! Formation layouts.
//!
//! An offset is a pure function of the slot index, the formation kind and the
//! spacing parameters, so switching layouts just re-evaluates every slot.

use bevy::prelude::*;
use serde::Deserialize;
use std::f32::consts::TAU;

use crate::core::SquadConfig;

/// Shape the squad takes around the leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum FormationKind {
    /// Concentric rings; each full ring pushes the next one out by one spacing
    #[default]
    Ring,
    /// Rows behind the leader
    Grid,
    /// Rows growing by one unit each
    Triangle,
    /// A long staggered column
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationParams {
    pub spacing: f32,
    pub per_ring: usize,
    pub per_row: usize,
}

impl FormationParams {
    pub fn from_config(config: &SquadConfig) -> Self {
        Self {
            spacing: config.formation_spacing,
            per_ring: config.units_per_ring.max(1),
            per_row: config.units_per_row.max(1),
        }
    }
}

impl Default for FormationParams {
    fn default() -> Self {
        Self::from_config(&SquadConfig::default())
    }
}

/// A unit's place in the formation, assigned by the [`super::SquadManager`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSlot {
    pub index: usize,
    /// Offset from the leader: `x` to the right, `y` forward
    pub offset: Vec2,
}

impl FormationSlot {
    /// The offset in the leader's local space (forward is -Z).
    pub fn local_offset(&self) -> Vec3 {
        Vec3::new(self.offset.x, 0.0, -self.offset.y)
    }
}

/// Mirror of the roster's slot for this unit; `None` while unregistered.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Formation {
    pub slot: Option<FormationSlot>,
}

/// Offset of slot `index` for the given layout.
pub fn formation_offset(index: usize, kind: FormationKind, params: &FormationParams) -> Vec2 {
    let spacing = params.spacing;

    match kind {
        FormationKind::Ring => {
            let per_ring = params.per_ring.max(1);
            let ring = index / per_ring;
            let position = index % per_ring;
            let angle = position as f32 * TAU / per_ring as f32;
            let radius = spacing * (1 + ring) as f32;
            Vec2::new(angle.cos(), angle.sin()) * radius
        }
        FormationKind::Grid => {
            let per_row = params.per_row.max(1);
            let row = index / per_row;
            let col = index % per_row;
            let x = (col as f32 - per_row as f32 / 2.0) * spacing;
            let z = -(row as f32) * spacing - spacing * 2.0;
            Vec2::new(x, z)
        }
        FormationKind::Triangle => {
            // Row r holds r + 1 units
            let mut row = 0;
            let mut first_in_row = 0;
            while first_in_row + row + 1 <= index {
                first_in_row += row + 1;
                row += 1;
            }
            let position = index - first_in_row;
            let x = (position as f32 - row as f32 * 0.5) * spacing;
            let z = -(row as f32) * spacing - spacing * 2.0;
            Vec2::new(x, z)
        }
        FormationKind::Line => {
            let per_row = params.per_row.max(1);
            let col = index % per_row;
            let x = (col as f32 - per_row as f32 / 2.0) * spacing * 0.5;
            let z = -(index as f32) * spacing * 0.3 - spacing * 2.0;
            Vec2::new(x, z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FormationParams {
        FormationParams {
            spacing: 1.0,
            per_ring: 8,
            per_row: 5,
        }
    }

    #[test]
    fn ring_grows_one_spacing_per_full_ring() {
        let p = params();
        assert!((formation_offset(0, FormationKind::Ring, &p).length() - 1.0).abs() < 1e-5);
        assert!((formation_offset(7, FormationKind::Ring, &p).length() - 1.0).abs() < 1e-5);
        assert!((formation_offset(8, FormationKind::Ring, &p).length() - 2.0).abs() < 1e-5);
        assert!((formation_offset(16, FormationKind::Ring, &p).length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn ring_slots_are_distinct() {
        let p = params();
        let offsets: Vec<Vec2> = (0..24)
            .map(|i| formation_offset(i, FormationKind::Ring, &p))
            .collect();
        for (i, a) in offsets.iter().enumerate() {
            for b in &offsets[i + 1..] {
                assert!(a.distance(*b) > 1e-3);
            }
        }
    }

    #[test]
    fn grid_rows_step_back() {
        let p = params();
        let first = formation_offset(0, FormationKind::Grid, &p);
        let next_row = formation_offset(5, FormationKind::Grid, &p);
        assert_eq!(first, Vec2::new(-2.5, -2.0));
        assert_eq!(next_row, Vec2::new(-2.5, -3.0));
    }

    #[test]
    fn triangle_rows_widen() {
        let p = params();
        // Row 0: index 0. Row 1: indices 1-2. Row 2: indices 3-5.
        assert_eq!(formation_offset(0, FormationKind::Triangle, &p).y, -2.0);
        assert_eq!(formation_offset(2, FormationKind::Triangle, &p).y, -3.0);
        assert_eq!(formation_offset(3, FormationKind::Triangle, &p).y, -4.0);
        assert_eq!(formation_offset(5, FormationKind::Triangle, &p).y, -4.0);
    }

    #[test]
    fn offsets_are_deterministic() {
        let p = params();
        for kind in [
            FormationKind::Ring,
            FormationKind::Grid,
            FormationKind::Triangle,
            FormationKind::Line,
        ] {
            assert_eq!(formation_offset(13, kind, &p), formation_offset(13, kind, &p));
        }
    }
}
