//! Squad command systems.

use bevy::prelude::*;
use bevy::utils::HashMap;

use super::formation::{Formation, FormationKind};
use super::roster::SquadManager;
use crate::carry::CarryLeaveRequest;
use crate::core::{horizontal_distance, DeathEvent, Misconfigured, SimConfig, TickTimer};
use crate::units::{Emerging, Unit, UnitState};

/// Call every unit around `origin` back into the squad.
#[derive(Event, Debug, Clone, Copy)]
pub struct Whistle {
    pub origin: Vec3,
    pub radius: f32,
}

/// Release the whole squad. Units stay where they are.
#[derive(Event, Debug, Clone, Copy)]
pub struct DismissSquad;

#[derive(Event, Debug, Clone, Copy)]
pub struct ChangeFormation(pub FormationKind);

/// Recently whistled; the unit heads back to the leader instead of picking up work.
#[derive(Component, Debug, Clone, Copy)]
pub struct Recalled(pub TickTimer);

/// Marks the entity the squad follows.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Leader;

pub fn track_leader(
    mut squad: ResMut<SquadManager>,
    added: Query<Entity, Added<Leader>>,
    mut removed: RemovedComponents<Leader>,
) {
    for entity in removed.read() {
        if squad.leader() == Some(entity) {
            squad.set_leader(None);
        }
    }
    for entity in added.iter() {
        squad.set_leader(Some(entity));
    }
}

/// Despawned units leave the roster; everyone behind them moves up a slot.
pub fn prune_despawned_units(
    mut squad: ResMut<SquadManager>,
    mut removed: RemovedComponents<Unit>,
) {
    for entity in removed.read() {
        if squad.unregister(entity) {
            debug!("Unit {:?} removed from squad ({} left)", entity, squad.len());
        }
    }
}

pub fn handle_dismiss(mut events: EventReader<DismissSquad>, mut squad: ResMut<SquadManager>) {
    for _ in events.read() {
        let released = squad.dismiss_all();
        info!("Dismissed {} units", released.len());
    }
}

/// A fallen leader loses the whole squad.
pub fn leader_down(
    mut deaths: EventReader<DeathEvent>,
    leaders: Query<(), With<Leader>>,
    mut squad: ResMut<SquadManager>,
) {
    for event in deaths.read() {
        if !leaders.contains(event.entity) {
            continue;
        }
        let released = squad.dismiss_all();
        warn!(
            "Leader {:?} is down, {} units left without a squad",
            event.entity,
            released.len()
        );
    }
}

pub fn handle_formation_change(
    mut events: EventReader<ChangeFormation>,
    mut squad: ResMut<SquadManager>,
) {
    for ChangeFormation(kind) in events.read() {
        if squad.formation() != *kind {
            squad.set_formation(*kind);
            info!("Formation changed to {:?}", kind);
        }
    }
}

/// Pull units in the whistle radius off whatever they're doing and into the squad.
///
/// Free units are admitted nearest first until the roster is full. Carriers
/// drop their load and fighters break off; both count as callable.
pub fn handle_whistle(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut events: EventReader<Whistle>,
    mut squad: ResMut<SquadManager>,
    mut units: Query<
        (Entity, &Transform, &mut UnitState),
        (With<Unit>, Without<Emerging>, Without<Misconfigured>),
    >,
    mut leaves: EventWriter<CarryLeaveRequest>,
) {
    for whistle in events.read() {
        let mut candidates: Vec<(Entity, f32)> = Vec::new();

        for (entity, transform, mut state) in units.iter_mut() {
            let distance = horizontal_distance(whistle.origin, transform.translation);
            if distance > whistle.radius {
                continue;
            }

            match *state {
                UnitState::Following => {}
                UnitState::Attached(_) => {
                    leaves.send(CarryLeaveRequest { unit: entity });
                }
                UnitState::Approaching(_) | UnitState::Attacking(_) | UnitState::Digging(_) => {
                    *state = UnitState::Following;
                }
                UnitState::Latched(_) => {
                    // Drop straight down from the hostile
                    *state = UnitState::Airborne;
                }
                _ => continue,
            }
            commands
                .entity(entity)
                .insert(Recalled(TickTimer::new(config.squad.recall_ticks)));

            if !squad.contains(entity) {
                candidates.push((entity, distance));
            }
        }

        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        let admitted = squad.bulk_call(candidates.into_iter().map(|(entity, _)| entity));
        info!("Whistled! Added {} units. Total: {}", admitted, squad.len());
    }
}

pub fn expire_recall(mut commands: Commands, mut query: Query<(Entity, &mut Recalled)>) {
    for (entity, mut recalled) in query.iter_mut() {
        if recalled.0.tick() {
            commands.entity(entity).remove::<Recalled>();
        }
    }
}

/// Copy each unit's roster slot onto its [`Formation`].
pub fn sync_formation_slots(squad: Res<SquadManager>, mut query: Query<(Entity, &mut Formation)>) {
    let slots: HashMap<Entity, _> = squad.slots().collect();

    for (entity, mut formation) in query.iter_mut() {
        let slot = slots.get(&entity).copied();
        if formation.slot != slot {
            formation.slot = slot;
        }
    }
}
