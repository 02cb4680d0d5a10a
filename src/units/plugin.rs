//! Unit plugin - registers unit lifecycle and movement systems.

use bevy::prelude::*;

use super::components::UnitEmerged;
use super::systems::*;
use crate::core::SimSet;

/// Unit plugin - emergence, landing, settling, thawing and leader following.
pub struct UnitPlugin;

impl Plugin for UnitPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<UnitEmerged>()
            .add_systems(
                Update,
                (
                    validate_units,
                    tick_emergence,
                    integrate_airborne,
                    land_on_contact,
                    settle_landed,
                    thaw_frozen,
                )
                    .chain()
                    .in_set(SimSet::Lifecycle),
            )
            .add_systems(Update, follow_leader.in_set(SimSet::Motion));
    }
}
