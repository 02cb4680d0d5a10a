//! Hazard plugin.

use bevy::prelude::*;

use super::components::UnitFrozen;
use super::systems::*;
use crate::combat::{apply_damage, strike_hostiles};
use crate::core::SimSet;

pub struct HazardPlugin;

impl Plugin for HazardPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<UnitFrozen>()
            .add_systems(
                Update,
                apply_hazards.after(strike_hostiles).in_set(SimSet::Resolve),
            )
            .add_systems(
                Update,
                clear_neutralized_hazards
                    .after(apply_damage)
                    .in_set(SimSet::Cleanup),
            );
    }
}
