//! Finding, digging and raising buried loads.

use bevy::prelude::*;
use bevy_rapier3d::prelude::RigidBody;

use super::components::*;
use crate::core::{horizontal_distance, Misconfigured, SimConfig};
use crate::squad::Recalled;
use crate::units::{Capabilities, Emerging, TaskKind, Unit, UnitState};

/// Treasure-finding units reveal every buried load around them.
pub fn reveal_buried(
    config: Res<SimConfig>,
    units: Query<
        (Entity, &Transform, &UnitState, &Capabilities),
        (With<Unit>, Without<Emerging>, Without<Misconfigured>),
    >,
    mut buried: Query<(Entity, &mut Buried, &Transform), (Without<Unit>, Without<Misconfigured>)>,
    mut revealed: EventWriter<TreasureRevealed>,
) {
    let radius = config.treasure.reveal_radius;

    for (unit, transform, state, capabilities) in units.iter() {
        if !state.is_grounded() || !capabilities.can_perform_task(TaskKind::FindTreasure) {
            continue;
        }

        for (load, mut treasure, load_transform) in buried.iter_mut() {
            if treasure.is_revealed()
                || horizontal_distance(transform.translation, load_transform.translation) > radius
            {
                continue;
            }
            treasure.reveal();
            info!("Unit {:?} found buried {:?}", unit, load);
            revealed.send(TreasureRevealed {
                carryable: load,
                finder: unit,
            });
        }
    }
}

/// Free diggers start on the nearest revealed load in reach.
pub fn seek_digs(
    config: Res<SimConfig>,
    mut units: Query<
        (&Transform, &mut UnitState, &Capabilities),
        (With<Unit>, Without<Emerging>, Without<Recalled>, Without<Misconfigured>),
    >,
    buried: Query<(Entity, &Buried, &Transform), (Without<Unit>, Without<Misconfigured>)>,
) {
    let radius = config.carry.detection_radius;

    for (transform, mut state, capabilities) in units.iter_mut() {
        if !state.is_following() || !capabilities.can_perform_task(TaskKind::Dig) {
            continue;
        }

        let nearest = buried
            .iter()
            .filter(|(_, treasure, _)| treasure.accepts_diggers())
            .map(|(entity, _, load_transform)| {
                (entity, horizontal_distance(transform.translation, load_transform.translation))
            })
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((load, _)) = nearest {
            *state = UnitState::Digging(load);
        }
    }
}

/// Every digger adds work scaled by its strength.
///
/// Whoever finishes the dig goes back to following; the rest notice on
/// their next turn that there is nothing left to dig.
pub fn dig_buried(
    config: Res<SimConfig>,
    mut units: Query<(&mut UnitState, &Capabilities), (With<Unit>, Without<Misconfigured>)>,
    mut buried: Query<&mut Buried, Without<Unit>>,
    mut excavated: EventWriter<TreasureExcavated>,
) {
    let treasure_config = &config.treasure;

    for (mut state, capabilities) in units.iter_mut() {
        let UnitState::Digging(target) = *state else {
            continue;
        };
        let Ok(mut treasure) = buried.get_mut(target) else {
            *state = UnitState::Following;
            continue;
        };
        if !treasure.accepts_diggers() {
            *state = UnitState::Following;
            continue;
        }

        let work = treasure_config.dig_rate * capabilities.strength;
        if treasure.dig(work, treasure_config.rise_ticks) {
            info!("Buried {:?} dug out", target);
            excavated.send(TreasureExcavated { carryable: target });
            *state = UnitState::Following;
        }
    }
}

/// Dug-out loads come up to the surface and turn into ordinary carryables.
pub fn raise_excavated(
    mut commands: Commands,
    mut buried: Query<(Entity, &mut Buried, &mut Transform, Option<&mut RigidBody>)>,
) {
    for (entity, mut treasure, mut transform, body) in buried.iter_mut() {
        let Some((height, surfaced)) = treasure.tick_rise() else {
            continue;
        };
        transform.translation.y = height;

        if surfaced {
            if let Some(mut body) = body {
                *body = RigidBody::Dynamic;
            }
            commands.entity(entity).remove::<Buried>();
            debug!("{:?} reached the surface", entity);
        }
    }
}
