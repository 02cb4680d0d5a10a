//! Treasure plugin.

use bevy::prelude::*;

use super::components::{TreasureExcavated, TreasureRevealed};
use super::systems::*;
use crate::combat::seek_hostiles;
use crate::core::SimSet;

/// Treasure plugin - revealing, digging out and raising buried loads.
pub struct TreasurePlugin;

impl Plugin for TreasurePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TreasureRevealed>()
            .add_event::<TreasureExcavated>()
            .add_systems(Update, raise_excavated.in_set(SimSet::Lifecycle))
            .add_systems(
                Update,
                // Fighting wins over digging
                (reveal_buried, seek_digs)
                    .chain()
                    .after(seek_hostiles)
                    .in_set(SimSet::Perception),
            )
            .add_systems(Update, dig_buried.in_set(SimSet::Resolve));
    }
}
