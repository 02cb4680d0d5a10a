//! Hostile behaviour systems.

use bevy::prelude::*;
use bevy::utils::{HashMap, HashSet};

use super::components::*;
use crate::carry::{CarryKind, Carryable, MotionAuthority};
use crate::combat::{Dead, Health};
use crate::core::{
    ground_offset, horizontal_distance, step_towards_horizontal, ConfigError, DamageEvent,
    DeathEvent, Misconfigured, SimConfig, SimRng,
};
use crate::flowers::PelletFlower;
use crate::squad::Leader;
use crate::units::{Ballistic, Capabilities, Emerging, Unit, UnitState};

type LeaderQuery<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform), (With<Leader>, Without<Dead>, Without<Hostile>)>;

fn living_leader(leader: &LeaderQuery) -> Option<(Entity, Vec3)> {
    leader
        .get_single()
        .ok()
        .map(|(entity, transform)| (entity, transform.translation))
}

/// Turn to face `target` without tilting.
fn face(transform: &mut Transform, target: Vec3) {
    if horizontal_distance(transform.translation, target) > 0.1 {
        let look_target = Vec3::new(target.x, transform.translation.y, target.z);
        transform.look_at(look_target, Vec3::Y);
    }
}

pub fn validate_hostiles(
    mut commands: Commands,
    query: Query<Entity, (Added<Hostile>, Without<Health>)>,
) {
    for entity in query.iter() {
        let err = ConfigError::HostileWithoutHealth;
        error!("Hostile {:?} disabled: {}", entity, err);
        commands.entity(entity).insert(Misconfigured(err));
    }
}

/// Patrolling hostiles notice a leader that is both in detection range and
/// inside their territory.
pub fn hostile_detection(
    leader: LeaderQuery,
    mut hostiles: Query<
        (Entity, &Transform, &HostileStats, &Patrol, &mut AiState),
        (With<Hostile>, Without<Dead>, Without<Unit>, Without<Misconfigured>),
    >,
) {
    let Some((_, leader_pos)) = living_leader(&leader) else {
        return;
    };

    for (hostile, transform, stats, patrol, mut ai_state) in hostiles.iter_mut() {
        if *ai_state != AiState::Patrolling {
            continue;
        }

        if horizontal_distance(transform.translation, leader_pos) <= stats.detection_range
            && patrol.contains(leader_pos)
        {
            debug!("Hostile {:?} spotted the leader", hostile);
            *ai_state = AiState::Chasing;
        }
    }
}

/// Wander between random points in the territory, pausing at each.
pub fn hostile_patrol(
    mut rng: ResMut<SimRng>,
    mut hostiles: Query<
        (&mut Transform, &HostileStats, &mut Patrol, &AiState),
        (With<Hostile>, Without<Dead>, Without<Unit>, Without<Misconfigured>),
    >,
) {
    for (mut transform, stats, mut patrol, ai_state) in hostiles.iter_mut() {
        if *ai_state != AiState::Patrolling {
            continue;
        }

        let Some(target) = patrol.target else {
            if patrol.wait.tick() {
                let offset = rng.point_in_disc(patrol.radius);
                patrol.target = Some(patrol.home + ground_offset(offset));
            }
            continue;
        };

        face(&mut transform, target);
        transform.translation =
            step_towards_horizontal(transform.translation, target, stats.patrol_speed);

        if horizontal_distance(transform.translation, target) <= f32::EPSILON {
            patrol.target = None;
            patrol.wait.reset();
        }
    }
}

/// Run at the leader, never past the edge of the territory.
///
/// Gives up once the leader is well out of detection range or has left
/// the territory; starts biting once in reach.
pub fn hostile_chase(
    leader: LeaderQuery,
    mut hostiles: Query<
        (&mut Transform, &HostileStats, &Patrol, &mut AiState),
        (With<Hostile>, Without<Dead>, Without<Unit>, Without<Misconfigured>),
    >,
) {
    let leader = living_leader(&leader);

    for (mut transform, stats, patrol, mut ai_state) in hostiles.iter_mut() {
        if *ai_state != AiState::Chasing {
            continue;
        }
        let Some((_, leader_pos)) = leader else {
            *ai_state = AiState::Patrolling;
            continue;
        };

        let distance = horizontal_distance(transform.translation, leader_pos);
        if distance <= stats.attack_range {
            *ai_state = AiState::Attacking;
            continue;
        }
        if distance > stats.detection_range * 1.5 || !patrol.contains(leader_pos) {
            *ai_state = AiState::Patrolling;
            continue;
        }

        face(&mut transform, leader_pos);
        let next = step_towards_horizontal(transform.translation, leader_pos, stats.chase_speed);
        transform.translation = patrol.clamp(next);
    }
}

/// Bite the leader each time the cooldown runs out, or go back to chasing
/// if they stepped out of reach.
pub fn hostile_attack(
    leader: LeaderQuery,
    mut hostiles: Query<
        (Entity, &mut Transform, &HostileStats, &mut AiState, &mut AttackTimer),
        (With<Hostile>, Without<Dead>, Without<Unit>, Without<Misconfigured>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let leader = living_leader(&leader);

    for (hostile, mut transform, stats, mut ai_state, mut attack_timer) in hostiles.iter_mut() {
        if *ai_state != AiState::Attacking {
            continue;
        }
        let Some((leader_entity, leader_pos)) = leader else {
            attack_timer.0.reset();
            *ai_state = AiState::Patrolling;
            continue;
        };

        face(&mut transform, leader_pos);
        if !attack_timer.0.tick() {
            continue;
        }
        attack_timer.0.reset();

        if horizontal_distance(transform.translation, leader_pos) > stats.attack_range {
            *ai_state = AiState::Chasing;
            continue;
        }

        debug!("Hostile {:?} bit the leader for {}", hostile, stats.damage);
        damage_events.send(DamageEvent {
            target: leader_entity,
            source: hostile,
            amount: stats.damage,
        });
    }
}

/// Shake on the interval while anything clings on, or at once when too many do.
///
/// Each latched unit holds on with probability `shake_off_resistance`;
/// the rest are flung outward and land on their own.
pub fn shake_off_latched(
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut hostiles: Query<
        (Entity, &Transform, &mut ShakeOff),
        (With<Hostile>, Without<Dead>, Without<Unit>, Without<Misconfigured>),
    >,
    mut units: Query<
        (Entity, &Transform, &mut UnitState, &mut Ballistic),
        (With<Unit>, Without<Misconfigured>),
    >,
    mut shaken: EventWriter<ShakenOff>,
) {
    let mut latched: HashMap<Entity, Vec<Entity>> = HashMap::default();
    for (unit, _, state, _) in units.iter() {
        if let UnitState::Latched(target) = *state {
            latched.entry(target).or_default().push(unit);
        }
    }

    let combat = &config.combat;
    let release_chance = 1.0 - combat.shake_off_resistance;

    for (hostile, hostile_transform, mut shake) in hostiles.iter_mut() {
        let Some(clinging) = latched.get(&hostile) else {
            shake.timer.reset();
            continue;
        };

        let due = shake.timer.tick();
        if !due && clinging.len() < shake.max_latched {
            continue;
        }
        shake.timer.reset();

        let mut thrown = 0;
        for &unit in clinging {
            if !rng.chance(release_chance) {
                continue;
            }
            let Ok((_, transform, mut state, mut ballistic)) = units.get_mut(unit) else {
                continue;
            };

            let away = Vec3::new(
                transform.translation.x - hostile_transform.translation.x,
                0.0,
                transform.translation.z - hostile_transform.translation.z,
            )
            .normalize_or(Vec3::X);
            ballistic.velocity = (away + Vec3::Y) * combat.fling_speed;
            *state = UnitState::Airborne;
            thrown += 1;
            shaken.send(ShakenOff { unit, hostile });
        }

        debug!(
            "Hostile {:?} shook off {} of {} units",
            hostile,
            thrown,
            clinging.len()
        );
    }
}

/// Eaters pick the nearest unit on the ground within reach and swallow it
/// once their eat timer runs out. Poisonous units hurt the eater.
pub fn eat_units(
    mut commands: Commands,
    mut hostiles: Query<
        (Entity, &Transform, &mut Eater),
        (With<Hostile>, Without<Dead>, Without<Unit>, Without<Misconfigured>),
    >,
    units: Query<
        (Entity, &Transform, &UnitState, &Capabilities),
        (With<Unit>, Without<Emerging>, Without<Misconfigured>),
    >,
    mut eaten_events: EventWriter<UnitEaten>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let mut eaten: HashSet<Entity> = HashSet::default();

    for (eater_entity, eater_transform, mut eater) in hostiles.iter_mut() {
        let range = eater.range;
        let in_reach = |unit: Entity| -> bool {
            units.get(unit).is_ok_and(|(_, transform, state, _)| {
                state.is_grounded()
                    && horizontal_distance(transform.translation, eater_transform.translation)
                        <= range
            })
        };

        // Victim escaped or is gone
        if let Some(victim) = eater.victim {
            if eaten.contains(&victim) || !in_reach(victim) {
                eater.victim = None;
            }
        }

        if eater.victim.is_none() {
            let candidate = units
                .iter()
                .filter(|(unit, _, _, _)| !eaten.contains(unit))
                .filter(|(unit, _, _, _)| in_reach(*unit))
                .map(|(unit, transform, _, _)| {
                    (unit, horizontal_distance(transform.translation, eater_transform.translation))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(unit, _)| unit);

            let Some(victim) = candidate else {
                continue;
            };
            eater.victim = Some(victim);
            eater.timer.reset();
        }

        if !eater.timer.tick() {
            continue;
        }

        let Some(victim) = eater.victim.take() else {
            continue;
        };
        eater.timer.reset();
        eaten.insert(victim);

        if let Ok((_, _, _, capabilities)) = units.get(victim) {
            if let Some(poison) = capabilities.poison_when_eaten {
                damage_events.send(DamageEvent {
                    target: eater_entity,
                    source: victim,
                    amount: poison,
                });
            }
        }

        info!("Hostile {:?} ate unit {:?}", eater_entity, victim);
        eaten_events.send(UnitEaten {
            unit: victim,
            eater: eater_entity,
        });
        commands.entity(victim).despawn_recursive();
    }
}

/// Dead hostiles drop everyone engaging them, then become a corpse or vanish.
pub fn handle_hostile_deaths(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut deaths: EventReader<DeathEvent>,
    hostiles: Query<(&Hostile, Option<&CorpseYield>), Without<PelletFlower>>,
    mut units: Query<(&mut UnitState, &mut Transform), With<Unit>>,
) {
    for event in deaths.read() {
        let Ok((hostile, corpse)) = hostiles.get(event.entity) else {
            continue;
        };

        for (mut state, mut transform) in units.iter_mut() {
            if state.combat_target() == Some(event.entity) {
                if matches!(*state, UnitState::Latched(_)) {
                    transform.translation.y = config.world.ground_height;
                }
                *state = UnitState::Following;
            }
        }

        match corpse {
            Some(corpse) => {
                info!("{} defeated, leaving a corpse (weight {})", hostile.name, corpse.weight);
                commands
                    .entity(event.entity)
                    .remove::<(
                        Hostile,
                        ShakeOff,
                        Eater,
                        CorpseYield,
                        Health,
                        Dead,
                        AiState,
                        HostileStats,
                        Patrol,
                        AttackTimer,
                    )>()
                    .insert((
                        Carryable::new(
                            corpse.weight,
                            CarryKind::Corpse {
                                value: corpse.value,
                            },
                        ),
                        MotionAuthority::Free,
                    ));
            }
            None => {
                info!("{} defeated", hostile.name);
                commands.entity(event.entity).despawn_recursive();
            }
        }
    }
}
