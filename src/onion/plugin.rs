//! Onion plugin.

use bevy::prelude::*;

use super::components::*;
use super::systems::*;
use crate::core::SimSet;

/// Onion plugin - activation, load absorption and unit release.
pub struct OnionPlugin;

impl Plugin for OnionPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<SpawnRequest>()
            .add_event::<LoadAbsorbed>()
            .add_event::<OnionActivated>()
            .add_systems(
                Update,
                (validate_onions, activate_onions, rise_onions)
                    .chain()
                    .in_set(SimSet::Lifecycle),
            )
            .add_systems(
                Update,
                (absorb_loads, queue_spawn_requests, spawn_from_onions)
                    .chain()
                    .in_set(SimSet::Follow),
            );
    }
}
