//! Squad plugin.

use bevy::prelude::*;

use super::roster::SquadManager;
use super::systems::*;
use crate::combat::apply_damage;
use crate::core::{SimConfig, SimSet};

/// Squad plugin - roster upkeep and the whistle / dismiss / formation commands.
pub struct SquadPlugin;

impl Plugin for SquadPlugin {
    fn build(&self, app: &mut App) {
        // A roster inserted up front (tests, custom caps) wins over the config
        if !app.world().contains_resource::<SquadManager>() {
            let squad = app
                .world()
                .get_resource::<SimConfig>()
                .map(|config| SquadManager::from_config(&config.squad))
                .unwrap_or_default();
            app.insert_resource(squad);
        }

        app
            .add_event::<Whistle>()
            .add_event::<DismissSquad>()
            .add_event::<ChangeFormation>()
            .add_systems(
                Update,
                (
                    expire_recall,
                    track_leader,
                    prune_despawned_units,
                    handle_dismiss,
                    handle_formation_change,
                    handle_whistle,
                    sync_formation_slots,
                )
                    .chain()
                    .in_set(SimSet::Perception),
            )
            .add_systems(
                Update,
                leader_down.after(apply_damage).in_set(SimSet::Cleanup),
            );
    }
}
