//! Enemy plugin - registers hostile systems.

use bevy::prelude::*;

use super::ai;
use super::components::{ShakenOff, UnitEaten};
use super::data::HostileRegistry;
use crate::combat::{apply_damage, strike_hostiles};
use crate::core::SimSet;

/// Enemy plugin - validation, roaming, shake-offs, eating, and corpses.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<HostileRegistry>()
            .add_event::<ShakenOff>()
            .add_event::<UnitEaten>()
            .add_systems(Update, ai::validate_hostiles.in_set(SimSet::Lifecycle))
            .add_systems(Update, ai::hostile_detection.in_set(SimSet::Perception))
            .add_systems(
                Update,
                (ai::hostile_patrol, ai::hostile_chase)
                    .chain()
                    .in_set(SimSet::Motion),
            )
            .add_systems(Update, ai::hostile_attack.in_set(SimSet::Resolve))
            .add_systems(
                Update,
                (ai::shake_off_latched, ai::eat_units)
                    .chain()
                    .after(strike_hostiles)
                    .in_set(SimSet::Resolve),
            )
            // Must run after apply_damage so this tick's deaths are seen
            .add_systems(
                Update,
                ai::handle_hostile_deaths
                    .after(apply_damage)
                    .in_set(SimSet::Cleanup),
            );
    }
}
