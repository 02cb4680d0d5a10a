//! Combat systems - engaging hostiles, latching, and damage.

use bevy::prelude::*;
use bevy::utils::HashSet;

use super::components::*;
use crate::core::{
    horizontal_distance, step_towards_horizontal, DamageEvent, DeathEvent, Misconfigured,
    SimConfig, SimRng, SimSet,
};
use crate::enemies::Hostile;
use crate::squad::{handle_whistle, Recalled};
use crate::units::{Capabilities, Emerging, TaskKind, Unit, UnitState};

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // After squad commands so whistled units are already recalled
        .add_systems(
            Update,
            seek_hostiles
                .after(handle_whistle)
                .in_set(SimSet::Perception),
        )
        .add_systems(Update, approach_hostiles.in_set(SimSet::Motion))
        .add_systems(Update, strike_hostiles.in_set(SimSet::Resolve))
        .add_systems(Update, ride_latched.in_set(SimSet::Follow))
        .add_systems(
            Update,
            (apply_damage, despawn_dead_units)
                .chain()
                .in_set(SimSet::Cleanup),
        );
}

type HostileQuery<'w, 's> =
    Query<'w, 's, (&'static Transform, Has<Dead>), (With<Hostile>, Without<Unit>)>;

/// Position of `target` if it is still a living hostile.
fn living_target(hostiles: &HostileQuery, target: Entity) -> Option<Vec3> {
    match hostiles.get(target) {
        Ok((transform, false)) => Some(transform.translation),
        _ => None,
    }
}

/// Free units notice the nearest living hostile in range and go for it.
pub fn seek_hostiles(
    config: Res<SimConfig>,
    mut units: Query<
        (&Transform, &mut UnitState, &Capabilities),
        (With<Unit>, Without<Emerging>, Without<Recalled>, Without<Misconfigured>),
    >,
    hostiles: Query<
        (Entity, &Transform),
        (With<Hostile>, Without<Dead>, Without<Unit>, Without<Misconfigured>),
    >,
) {
    let radius = config.combat.detection_radius;

    for (transform, mut state, capabilities) in units.iter_mut() {
        if !state.is_following() || !capabilities.can_perform_task(TaskKind::Fight) {
            continue;
        }

        let nearest = hostiles
            .iter()
            .map(|(entity, hostile)| {
                (entity, horizontal_distance(transform.translation, hostile.translation))
            })
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((target, _)) = nearest {
            *state = UnitState::Approaching(target);
        }
    }
}

/// Walk toward the target; on reaching it, either latch on or stand and fight.
pub fn approach_hostiles(
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut units: Query<
        (Entity, &mut Transform, &mut UnitState, &mut UnitCombat, &Capabilities),
        (With<Unit>, Without<Misconfigured>),
    >,
    hostiles: HostileQuery,
) {
    let combat = &config.combat;

    for (entity, mut transform, mut state, mut unit_combat, capabilities) in units.iter_mut() {
        let UnitState::Approaching(target) = *state else {
            continue;
        };
        let Some(target_pos) = living_target(&hostiles, target) else {
            *state = UnitState::Following;
            continue;
        };

        let distance = horizontal_distance(transform.translation, target_pos);

        // Lost track of it
        if distance > combat.detection_radius * 1.5 {
            *state = UnitState::Following;
            continue;
        }

        if distance <= combat.melee_range {
            if rng.chance(combat.latch_chance) {
                let angle = rng.angle();
                unit_combat.latch_offset = Vec3::new(
                    angle.cos() * combat.latch_offset,
                    combat.latch_height,
                    angle.sin() * combat.latch_offset,
                );
                unit_combat.latch.reset();
                *state = UnitState::Latched(target);
                debug!("Unit {:?} latched onto {:?}", entity, target);
            } else {
                *state = UnitState::Attacking(target);
            }
            continue;
        }

        let speed = config.units.move_speed * capabilities.speed;
        transform.translation = step_towards_horizontal(transform.translation, target_pos, speed);
    }
}

/// Standing and latched units hit their target every attack interval.
///
/// Latches run out on their own after the latch duration. A target that died
/// or vanished sends its attackers back to following.
pub fn strike_hostiles(
    config: Res<SimConfig>,
    mut units: Query<
        (Entity, &mut Transform, &mut UnitState, &mut UnitCombat, &Capabilities),
        (With<Unit>, Without<Misconfigured>),
    >,
    hostiles: HostileQuery,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let combat = &config.combat;
    let ground = config.world.ground_height;

    for (entity, mut transform, mut state, mut unit_combat, capabilities) in units.iter_mut() {
        let (target, latched) = match *state {
            UnitState::Attacking(target) => (target, false),
            UnitState::Latched(target) => (target, true),
            _ => continue,
        };

        let Some(target_pos) = living_target(&hostiles, target) else {
            *state = UnitState::Following;
            transform.translation.y = ground;
            continue;
        };

        if latched {
            if unit_combat.latch.tick() {
                debug!("Unit {:?} let go of {:?}", entity, target);
                *state = UnitState::Following;
                transform.translation.y = ground;
                continue;
            }
        } else if horizontal_distance(transform.translation, target_pos) > combat.melee_range * 1.2 {
            *state = UnitState::Approaching(target);
            continue;
        }

        if unit_combat.cooldown.tick() {
            unit_combat.cooldown.reset();
            damage_events.send(DamageEvent {
                target,
                source: entity,
                amount: combat.attack_damage * capabilities.attack_multiplier(),
            });
        }
    }
}

/// Latched units move with whatever they cling to.
pub fn ride_latched(
    mut units: Query<(&mut Transform, &UnitState, &UnitCombat), (With<Unit>, Without<Misconfigured>)>,
    hostiles: Query<&Transform, (With<Hostile>, Without<Unit>)>,
) {
    for (mut transform, state, unit_combat) in units.iter_mut() {
        let UnitState::Latched(target) = *state else {
            continue;
        };
        if let Ok(hostile) = hostiles.get(target) {
            transform.translation = hostile.translation + unit_combat.latch_offset;
        }
    }
}

/// Apply queued damage and report each death exactly once.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Has<Dead>), Without<Misconfigured>>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this tick to avoid duplicate death events
    let mut died_this_tick = HashSet::new();

    for event in damage_events.read() {
        if died_this_tick.contains(&event.target) {
            continue;
        }

        let Ok((mut health, dead)) = health_query.get_mut(event.target) else {
            continue;
        };
        if dead {
            continue;
        }

        health.take_damage(event.amount);

        if health.is_dead() {
            died_this_tick.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Dead units are removed. Roster and carrier groups notice on their own.
pub fn despawn_dead_units(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    units: Query<(), With<Unit>>,
) {
    for event in death_events.read() {
        if units.contains(event.entity) {
            info!("Unit {:?} died", event.entity);
            commands.entity(event.entity).despawn_recursive();
        }
    }
}
