//! Carry systems, one per tick stage.

use bevy::prelude::*;
use bevy::utils::HashSet;
use bevy_rapier3d::prelude::RigidBody;

use super::components::*;
use super::coordinator::{AnchorTransition, JoinOutcome, LeaveOutcome};
use crate::core::{
    ground_offset, horizontal_distance, step_towards_horizontal, Misconfigured, SimConfig,
};
use crate::onion::{Absorbing, Onion};
use crate::squad::Recalled;
use crate::treasure::Buried;
use crate::units::{Capabilities, TaskKind, Unit, UnitState};

type DeliveryPoints<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Onion, &'static Transform),
    (Without<Carryable>, Without<Unit>, Without<Misconfigured>),
>;

/// Put a carrier that just let go back on the ground.
///
/// Airborne and latched units keep their height; something else moves them.
fn set_down(state: &UnitState, transform: &mut Transform, ground: f32) {
    if state.is_grounded() {
        transform.translation.y = ground;
    }
}

/// Park carryables whose weight makes no sense.
pub fn validate_carryables(
    mut commands: Commands,
    query: Query<(Entity, &Carryable), Added<Carryable>>,
) {
    for (entity, carryable) in query.iter() {
        if let Err(err) = carryable.validate() {
            error!("Carryable {:?} disabled: {}", entity, err);
            commands.entity(entity).insert(Misconfigured(err));
        }
    }
}

/// Free units look around for a load that still needs hands.
///
/// Each unit asks to join the nearest one in range; the request is settled in
/// the membership stage of the same tick.
pub fn seek_carryables(
    config: Res<SimConfig>,
    units: Query<
        (Entity, &Transform, &UnitState, &CarrierAgent, &Capabilities),
        (With<Unit>, Without<Recalled>, Without<Misconfigured>),
    >,
    carryables: Query<
        (Entity, &Transform, &Carryable),
        (Without<Unit>, Without<Buried>, Without<Misconfigured>),
    >,
    mut joins: EventWriter<CarryJoinRequest>,
) {
    let radius = config.carry.detection_radius;

    for (unit, transform, state, agent, capabilities) in units.iter() {
        if !state.is_following()
            || agent.is_attached()
            || !capabilities.can_perform_task(TaskKind::Carry)
        {
            continue;
        }

        let nearest = carryables
            .iter()
            .filter(|(_, _, carryable)| carryable.accepts_carriers())
            .map(|(entity, carry_transform, _)| {
                (
                    entity,
                    horizontal_distance(transform.translation, carry_transform.translation),
                )
            })
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((carryable, _)) = nearest {
            joins.send(CarryJoinRequest { unit, carryable });
        }
    }
}

fn apply_anchor(
    carryable: Entity,
    transition: AnchorTransition,
    carriers: usize,
    authority: &mut MotionAuthority,
    body: Option<Mut<RigidBody>>,
    anchor_events: &mut EventWriter<AnchorChanged>,
) {
    let (new_authority, new_body) = match transition {
        AnchorTransition::Anchored => {
            info!("Carryable {:?} lifted by {} carriers", carryable, carriers);
            (MotionAuthority::Coordinator, RigidBody::KinematicPositionBased)
        }
        AnchorTransition::Released => {
            info!("Carryable {:?} dropped ({} carriers left)", carryable, carriers);
            (MotionAuthority::Free, RigidBody::Dynamic)
        }
    };

    *authority = new_authority;
    if let Some(mut body) = body {
        *body = new_body;
    }
    anchor_events.send(AnchorChanged {
        carryable,
        transition,
        carriers,
    });
}

/// Settle every join and leave of this tick, then re-spread the touched rings.
///
/// Leaves go first so a unit that lets go and is re-grabbed in the same tick
/// ends up attached. Members that vanished, or were pulled into another state
/// by combat or hazards, are dropped as if they had asked to leave.
#[allow(clippy::too_many_arguments)]
pub fn resolve_membership(
    config: Res<SimConfig>,
    mut leaves: EventReader<CarryLeaveRequest>,
    mut joins: EventReader<CarryJoinRequest>,
    mut units: Query<
        (&mut UnitState, &mut CarrierAgent, &mut Transform),
        (With<Unit>, Without<Misconfigured>),
    >,
    mut carryables: Query<
        (Entity, &mut Carryable, &Transform, &mut MotionAuthority, Option<&mut RigidBody>),
        (Without<Unit>, Without<Misconfigured>),
    >,
    onions: DeliveryPoints,
    mut anchor_events: EventWriter<AnchorChanged>,
) {
    let ground = config.world.ground_height;
    let mut touched: HashSet<Entity> = HashSet::default();

    for request in leaves.read() {
        let Ok((mut state, mut agent, mut transform)) = units.get_mut(request.unit) else {
            continue;
        };
        let Some(carried) = agent.attached else {
            continue;
        };

        agent.detach();
        if *state == UnitState::Attached(carried) {
            *state = UnitState::Following;
        }
        set_down(&state, &mut transform, ground);

        let Ok((_, mut carryable, _, mut authority, body)) = carryables.get_mut(carried) else {
            continue;
        };
        if let LeaveOutcome::Removed(transition) = carryable.request_leave(request.unit) {
            debug!("Unit {:?} let go of {:?}", request.unit, carried);
            touched.insert(carried);
            if let Some(transition) = transition {
                let carriers = carryable.carrier_count();
                apply_anchor(carried, transition, carriers, &mut authority, body, &mut anchor_events);
            }
        }
    }

    for request in joins.read() {
        let Ok((mut state, mut agent, _)) = units.get_mut(request.unit) else {
            continue;
        };
        // Something else claimed the unit since it sent the request
        if !state.is_following() || agent.is_attached() {
            continue;
        }
        let Ok((_, mut carryable, carry_transform, mut authority, body)) =
            carryables.get_mut(request.carryable)
        else {
            continue;
        };

        let origin = carry_transform.translation;
        let outcome = carryable.request_join(request.unit, || {
            nearest_active_onion(origin, onions.iter())
        });

        if let JoinOutcome::Admitted(transition) = outcome {
            agent.attach(request.carryable);
            *state = UnitState::Attached(request.carryable);
            touched.insert(request.carryable);
            debug!("Unit {:?} grabbed {:?}", request.unit, request.carryable);

            if let Some(transition) = transition {
                let carriers = carryable.carrier_count();
                apply_anchor(
                    request.carryable,
                    transition,
                    carriers,
                    &mut authority,
                    body,
                    &mut anchor_events,
                );
            }
        }
    }

    for (entity, mut carryable, _, mut authority, mut body) in carryables.iter_mut() {
        let stale: Vec<Entity> = match carryable.coordinator() {
            Some(coordinator) => coordinator
                .members()
                .iter()
                .copied()
                .filter(|&member| {
                    !matches!(
                        units.get(member),
                        Ok((state, agent, _))
                            if agent.attached == Some(entity)
                                && *state == UnitState::Attached(entity)
                    )
                })
                .collect(),
            None => continue,
        };

        for member in stale {
            if let Ok((state, mut agent, mut transform)) = units.get_mut(member) {
                if agent.attached == Some(entity) {
                    agent.detach();
                    set_down(&state, &mut transform, ground);
                }
            }
            if let LeaveOutcome::Removed(Some(transition)) = carryable.request_leave(member) {
                let carriers = carryable.carrier_count();
                apply_anchor(
                    entity,
                    transition,
                    carriers,
                    &mut authority,
                    body.as_mut().map(|b| b.reborrow()),
                    &mut anchor_events,
                );
            }
            touched.insert(entity);
        }
    }

    let radius = config.carry.carrier_radius;
    for carryable_entity in touched {
        let Ok((_, carryable, _, _, _)) = carryables.get(carryable_entity) else {
            continue;
        };
        let Some(coordinator) = carryable.coordinator() else {
            continue;
        };
        for (member, index, offset) in coordinator.slot_offsets(radius) {
            if let Ok((_, mut agent, _)) = units.get_mut(member) {
                agent.slot = Some(index);
                agent.offset = offset;
            }
        }
    }
}

/// Nearest delivery point that is currently accepting loads.
///
/// Callers hand in onions that passed validation only.
pub fn nearest_active_onion<'a>(
    origin: Vec3,
    onions: impl Iterator<Item = (Entity, &'a Onion, &'a Transform)>,
) -> Option<Entity> {
    onions
        .filter(|(_, onion, _)| onion.is_active())
        .map(|(entity, _, transform)| (entity, horizontal_distance(origin, transform.translation)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Anchored loads walk toward their delivery point's current position.
pub fn advance_carried_loads(
    config: Res<SimConfig>,
    mut carryables: Query<(&Carryable, &mut Transform, &MotionAuthority), Without<Misconfigured>>,
    destinations: Query<&Transform, (With<Onion>, Without<Carryable>, Without<Misconfigured>)>,
) {
    let lift = config.world.ground_height + config.carry.carry_height;

    for (carryable, mut transform, authority) in carryables.iter_mut() {
        if *authority != MotionAuthority::Coordinator {
            continue;
        }
        // No delivery point was active when the group formed: hold the load up in place
        let target = carryable
            .destination()
            .and_then(|onion| destinations.get(onion).ok())
            .map(|t| t.translation);

        let mut position = transform.translation;
        if let Some(target) = target {
            position = step_towards_horizontal(position, target, config.carry.carry_speed);
        }
        position.y = position.y.max(lift);
        transform.translation = position;
    }
}

/// Hand over loads that reached their delivery point.
///
/// Pellets and corpses need the onion to accept them; if it refuses, the load
/// stays anchored and the check repeats next tick. Treasure is collected on
/// the spot.
#[allow(clippy::too_many_arguments)]
pub fn resolve_arrivals(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut carryables: Query<
        (Entity, &mut Carryable, &Transform, &mut MotionAuthority),
        (Without<Unit>, Without<Misconfigured>),
    >,
    mut onions: Query<
        (&mut Onion, &Transform),
        (Without<Carryable>, Without<Unit>, Without<Misconfigured>),
    >,
    mut units: Query<(&mut UnitState, &mut CarrierAgent, &mut Transform), With<Unit>>,
    mut delivered: EventWriter<CarryDelivered>,
    mut collected: EventWriter<TreasureCollected>,
) {
    for (entity, mut carryable, transform, mut authority) in carryables.iter_mut() {
        if *authority != MotionAuthority::Coordinator {
            continue;
        }
        let Some(destination) = carryable.destination() else {
            continue;
        };
        let Ok((mut onion, onion_transform)) = onions.get_mut(destination) else {
            continue;
        };
        if horizontal_distance(transform.translation, onion_transform.translation)
            > config.carry.arrival_distance
        {
            continue;
        }

        let kind = carryable.kind;
        if kind.yields_units() && !onion.receive(&kind) {
            debug!("Onion {:?} refused {:?}, retrying", destination, entity);
            continue;
        }

        let Some(released) = carryable.deliver() else {
            continue;
        };
        for &member in &released {
            if let Ok((mut state, mut agent, mut unit_transform)) = units.get_mut(member) {
                agent.detach();
                if *state == UnitState::Attached(entity) {
                    *state = UnitState::Following;
                }
                set_down(&state, &mut unit_transform, config.world.ground_height);
            }
        }

        match kind {
            CarryKind::Treasure { value } => {
                info!("Treasure {:?} collected (value {})", entity, value);
                collected.send(TreasureCollected {
                    carryable: entity,
                    value,
                });
                commands.entity(entity).despawn_recursive();
            }
            CarryKind::Pellet { .. } | CarryKind::Corpse { .. } => {
                info!(
                    "{:?} delivered to onion {:?} by {} carriers",
                    kind,
                    destination,
                    released.len()
                );
                *authority = MotionAuthority::Absorbed;
                commands.entity(entity).insert(Absorbing::new(
                    destination,
                    transform.translation,
                    config.onion.absorb_ticks,
                ));
                delivered.send(CarryDelivered {
                    carryable: entity,
                    onion: destination,
                    kind,
                    carriers: released.len(),
                });
            }
        }
    }
}

/// Carriers trail their slot around the load instead of pathing.
pub fn follow_carry_slots(
    config: Res<SimConfig>,
    mut units: Query<
        (&mut Transform, &UnitState, &CarrierAgent),
        (With<Unit>, Without<Carryable>, Without<Misconfigured>),
    >,
    carryables: Query<&Transform, (With<Carryable>, Without<Unit>)>,
) {
    for (mut transform, state, agent) in units.iter_mut() {
        let Some(carried) = state.carried() else {
            continue;
        };
        let Ok(carry_transform) = carryables.get(carried) else {
            continue;
        };

        let mut target = carry_transform.translation + ground_offset(agent.offset);
        target.y = carry_transform.translation.y;
        transform.translation = transform
            .translation
            .lerp(target, config.carry.follow_rate.clamp(0.0, 1.0));
    }
}

/// Units still pointing at a load that no longer exists go back to following.
pub fn release_orphaned_carriers(
    config: Res<SimConfig>,
    mut units: Query<(&mut UnitState, &mut CarrierAgent, &mut Transform), With<Unit>>,
    carryables: Query<(), With<Carryable>>,
) {
    for (mut state, mut agent, mut transform) in units.iter_mut() {
        let Some(carried) = agent.attached.or(state.carried()) else {
            continue;
        };
        if carryables.contains(carried) {
            continue;
        }
        agent.detach();
        if state.carried().is_some() {
            *state = UnitState::Following;
        }
        set_down(&state, &mut transform, config.world.ground_height);
    }
}
