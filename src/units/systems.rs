//! Unit lifecycle and movement systems.

use bevy::prelude::*;

use super::capabilities::Capabilities;
use super::components::*;
use crate::combat::Health;
use crate::core::{
    horizontal_distance, step_towards_horizontal, ConfigError, GroundContact, Misconfigured,
    SimConfig, TickTimer,
};
use crate::squad::{Formation, SquadManager};

/// Units spawned without Health can't be damaged or killed; keep them out of the tick.
pub fn validate_units(
    mut commands: Commands,
    query: Query<Entity, (Added<Unit>, Without<Health>)>,
) {
    for entity in query.iter() {
        let err = ConfigError::UnitWithoutHealth;
        error!("Unit {:?} disabled: {}", entity, err);
        commands.entity(entity).insert(Misconfigured(err));
    }
}

/// Raise emerging units out of the ground and hand them to the simulation.
pub fn tick_emergence(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Emerging, &mut Transform), With<Unit>>,
    mut emerged: EventWriter<UnitEmerged>,
) {
    for (entity, mut emerging, mut transform) in query.iter_mut() {
        let finished = emerging.timer.tick();
        let t = emerging.timer.fraction();
        transform.translation.y =
            emerging.from_height + (emerging.to_height - emerging.from_height) * t;

        if finished {
            transform.translation.y = emerging.to_height;
            commands.entity(entity).remove::<Emerging>();
            emerged.send(UnitEmerged {
                unit: entity,
                onion: emerging.onion,
            });
            debug!("Unit {:?} emerged", entity);
        }
    }
}

/// Simple projectile motion for thrown or flung units.
pub fn integrate_airborne(
    config: Res<SimConfig>,
    mut query: Query<
        (Entity, &UnitState, &mut Ballistic, &mut Transform),
        (With<Unit>, Without<Emerging>, Without<Misconfigured>),
    >,
    mut contacts: EventWriter<GroundContact>,
) {
    let ground = config.world.ground_height;

    for (entity, state, mut ballistic, mut transform) in query.iter_mut() {
        if *state != UnitState::Airborne {
            continue;
        }

        ballistic.velocity.y -= config.world.gravity;
        transform.translation += ballistic.velocity;

        if transform.translation.y <= ground {
            transform.translation.y = ground;
            contacts.send(GroundContact { unit: entity });
        }
    }
}

pub fn land_on_contact(
    config: Res<SimConfig>,
    mut contacts: EventReader<GroundContact>,
    mut query: Query<(&mut UnitState, &mut Ballistic), (With<Unit>, Without<Misconfigured>)>,
) {
    for contact in contacts.read() {
        let Ok((mut state, mut ballistic)) = query.get_mut(contact.unit) else {
            continue;
        };
        if *state != UnitState::Airborne {
            continue;
        }
        ballistic.velocity.y = 0.0;
        *state = UnitState::Landed(TickTimer::new(config.units.settle_ticks));
    }
}

/// Landed units slide to a stop, then become controllable.
///
/// The whole settle delay has to pass before the unit looks for work.
pub fn settle_landed(
    config: Res<SimConfig>,
    mut squad: ResMut<SquadManager>,
    mut query: Query<
        (Entity, &mut UnitState, &mut Ballistic, &mut Transform),
        (With<Unit>, Without<Emerging>, Without<Misconfigured>),
    >,
) {
    let keep = 1.0 - config.units.landing_deceleration.clamp(0.0, 1.0);

    for (entity, mut state, mut ballistic, mut transform) in query.iter_mut() {
        let UnitState::Landed(timer) = &mut *state else {
            continue;
        };

        let settled = timer.tick();
        ballistic.velocity = Vec3::new(ballistic.velocity.x * keep, 0.0, ballistic.velocity.z * keep);
        transform.translation += ballistic.velocity;

        if settled {
            ballistic.velocity = Vec3::ZERO;
            *state = UnitState::Following;

            if config.squad.auto_register && !squad.register(entity) && !squad.contains(entity) {
                debug!("Squad full, unit {:?} stays idle", entity);
            }
        }
    }
}

pub fn thaw_frozen(mut query: Query<&mut UnitState, (With<Unit>, Without<Misconfigured>)>) {
    for mut state in query.iter_mut() {
        let UnitState::Frozen(timer) = &mut *state else {
            continue;
        };
        if timer.tick() {
            *state = UnitState::Following;
        }
    }
}

/// Registered, free units walk to their formation spot around the leader.
pub fn follow_leader(
    config: Res<SimConfig>,
    squad: Res<SquadManager>,
    leaders: Query<&Transform, Without<Unit>>,
    mut units: Query<
        (&mut Transform, &UnitState, &Formation, &Capabilities),
        (With<Unit>, Without<Emerging>, Without<Misconfigured>),
    >,
) {
    let Some(leader) = squad.leader().and_then(|e| leaders.get(e).ok()) else {
        return;
    };

    for (mut transform, state, formation, capabilities) in units.iter_mut() {
        if !state.is_following() {
            continue;
        }
        let Some(slot) = formation.slot else {
            continue;
        };

        let target = leader.translation + leader.rotation * slot.local_offset();
        if horizontal_distance(transform.translation, target) <= config.units.stop_distance {
            continue;
        }

        let speed = config.units.move_speed * capabilities.speed;
        transform.translation = step_towards_horizontal(transform.translation, target, speed);
    }
}
