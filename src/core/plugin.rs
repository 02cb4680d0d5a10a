//! Core plugin that sets up simulation state, tick ordering, and shared resources.

use bevy::prelude::*;

use super::config::SimConfig;
use super::events::*;
use super::rng::SimRng;
use super::states::*;

/// Number of simulation ticks run so far. Does not advance while paused.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimTick(pub u64);

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The simulation state (Running / Paused)
/// - The ordered [`SimSet`] chain every gameplay system runs in
/// - Shared events (DamageEvent, DeathEvent, GroundContact)
/// - The config and RNG resources (a config inserted before this plugin wins)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>();

        let seed = app.world().resource::<SimConfig>().seed;

        app
            .init_state::<SimState>()
            .insert_resource(SimRng::from_seed(seed))
            .init_resource::<SimTick>()

            // Register shared events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<GroundContact>()

            // One tick = one pass through these stages, in order
            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Lifecycle,
                    SimSet::Perception,
                    SimSet::Membership,
                    SimSet::Motion,
                    SimSet::Resolve,
                    SimSet::Follow,
                    SimSet::Cleanup,
                )
                    .chain()
                    .run_if(in_state(SimState::Running)),
            )
            .add_systems(Update, count_ticks.in_set(SimSet::Lifecycle));
    }
}

fn count_ticks(mut tick: ResMut<SimTick>) {
    tick.0 += 1;
}
