//! Carry plugin - registers carry events and the per-stage carry systems.

use bevy::prelude::*;

use super::components::*;
use super::systems::*;
use crate::combat::seek_hostiles;
use crate::core::SimSet;

/// Carry plugin - load discovery, the join/leave protocol, hauling and delivery.
pub struct CarryPlugin;

impl Plugin for CarryPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<CarryJoinRequest>()
            .add_event::<CarryLeaveRequest>()
            .add_event::<AnchorChanged>()
            .add_event::<CarryDelivered>()
            .add_event::<TreasureCollected>()
            .add_systems(Update, validate_carryables.in_set(SimSet::Lifecycle))
            .add_systems(
                Update,
                // A unit near both a load and a hostile picks the fight
                seek_carryables
                    .after(seek_hostiles)
                    .in_set(SimSet::Perception),
            )
            .add_systems(Update, resolve_membership.in_set(SimSet::Membership))
            .add_systems(Update, advance_carried_loads.in_set(SimSet::Motion))
            .add_systems(Update, resolve_arrivals.in_set(SimSet::Resolve))
            .add_systems(Update, follow_carry_slots.in_set(SimSet::Follow))
            .add_systems(Update, release_orphaned_carriers.in_set(SimSet::Cleanup));
    }
}
