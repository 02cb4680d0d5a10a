//! Hazard systems.

use bevy::prelude::*;

use super::components::*;
use crate::carry::CarryLeaveRequest;
use crate::combat::Dead;
use crate::core::{
    horizontal_distance, DamageEvent, DeathEvent, Misconfigured, SimConfig, TickTimer,
};
use crate::units::{Capabilities, Emerging, Unit, UnitState};

/// Hurt, freeze, or get worn down by every unit standing in each hazard.
pub fn apply_hazards(
    config: Res<SimConfig>,
    hazards: Query<
        (Entity, &Hazard, &Transform),
        (Without<Dead>, Without<Unit>, Without<Misconfigured>),
    >,
    mut units: Query<
        (Entity, &mut Transform, &mut UnitState, &Capabilities),
        (With<Unit>, Without<Emerging>, Without<Misconfigured>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
    mut leaves: EventWriter<CarryLeaveRequest>,
    mut frozen: EventWriter<UnitFrozen>,
) {
    for (hazard_entity, hazard, hazard_transform) in hazards.iter() {
        for (unit, mut transform, mut state, capabilities) in units.iter_mut() {
            if *state == UnitState::Airborne
                || horizontal_distance(transform.translation, hazard_transform.translation)
                    > hazard.radius
            {
                continue;
            }

            if capabilities.neutralizes == Some(hazard.kind) && state.is_grounded() {
                damage_events.send(DamageEvent {
                    target: hazard_entity,
                    source: unit,
                    amount: hazard.neutralize_per_tick,
                });
            }

            if capabilities.can_survive_hazard(hazard.kind) {
                continue;
            }

            if hazard.freezes() {
                if matches!(*state, UnitState::Frozen(_)) {
                    continue;
                }
                if state.carried().is_some() {
                    leaves.send(CarryLeaveRequest { unit });
                }
                if matches!(*state, UnitState::Latched(_)) {
                    transform.translation.y = config.world.ground_height;
                }
                *state = UnitState::Frozen(TickTimer::new(config.units.freeze_ticks));
                debug!("Unit {:?} frozen by {:?}", unit, hazard_entity);
                frozen.send(UnitFrozen {
                    unit,
                    hazard: hazard_entity,
                });
            } else {
                damage_events.send(DamageEvent {
                    target: unit,
                    source: hazard_entity,
                    amount: hazard.damage_per_tick,
                });
            }
        }
    }
}

/// Neutralized hazards disappear.
pub fn clear_neutralized_hazards(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    hazards: Query<&Hazard>,
) {
    for event in deaths.read() {
        if let Ok(hazard) = hazards.get(event.entity) {
            info!("{:?} hazard {:?} neutralized", hazard.kind, event.entity);
            commands.entity(event.entity).despawn_recursive();
        }
    }
}
