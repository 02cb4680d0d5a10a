//! Onion systems.

use bevy::prelude::*;

use super::components::*;
use crate::carry::Carryable;
use crate::core::{horizontal_distance, Misconfigured, SimConfig, SimRng};
use crate::squad::SquadManager;
use crate::units::{emerging_unit_bundle, Emerging};

pub fn validate_onions(mut commands: Commands, query: Query<(Entity, &Onion), Added<Onion>>) {
    for (entity, onion) in query.iter() {
        if let Err(err) = onion.validate() {
            error!("Onion {:?} disabled: {}", entity, err);
            commands.entity(entity).insert(Misconfigured(err));
        }
    }
}

/// Buried onions wake up when the leader comes close.
pub fn activate_onions(
    config: Res<SimConfig>,
    squad: Res<SquadManager>,
    leaders: Query<&Transform, Without<Onion>>,
    mut onions: Query<(Entity, &mut Onion, &Transform), Without<Misconfigured>>,
) {
    let Some(leader) = squad.leader().and_then(|e| leaders.get(e).ok()) else {
        return;
    };

    for (entity, mut onion, transform) in onions.iter_mut() {
        if horizontal_distance(leader.translation, transform.translation)
            <= config.onion.activation_radius
            && onion.activate(config.onion.rise_ticks)
        {
            info!("Onion {:?} is rising", entity);
        }
    }
}

pub fn rise_onions(
    config: Res<SimConfig>,
    mut onions: Query<(Entity, &mut Onion, &mut Transform), Without<Misconfigured>>,
    mut activated: EventWriter<OnionActivated>,
) {
    for (entity, mut onion, mut transform) in onions.iter_mut() {
        let Some(progress) = onion.tick_rise() else {
            continue;
        };
        let buried = onion.surface_height - config.onion.buried_depth;
        transform.translation.y = buried + (onion.surface_height - buried) * progress;

        if onion.is_active() {
            transform.translation.y = onion.surface_height;
            info!("Onion {:?} is active", entity);
            activated.send(OnionActivated { onion: entity });
        }
    }
}

/// Draw delivered loads into their onion, then turn them into stored units.
pub fn absorb_loads(
    mut commands: Commands,
    mut loads: Query<(Entity, &Carryable, &mut Absorbing, &mut Transform)>,
    mut onions: Query<(&mut Onion, &Transform), Without<Absorbing>>,
    mut absorbed: EventWriter<LoadAbsorbed>,
) {
    for (entity, carryable, mut absorbing, mut transform) in loads.iter_mut() {
        let Ok((mut onion, onion_transform)) = onions.get_mut(absorbing.onion) else {
            // Onion is gone; the load stays where it is
            commands.entity(entity).remove::<Absorbing>();
            continue;
        };

        let finished = absorbing.timer.tick();
        let t = absorbing.timer.fraction();
        transform.translation = absorbing.from.lerp(onion_transform.translation, t);
        transform.scale = Vec3::splat(1.0 - t);

        if finished {
            let added = onion.store(carryable.kind.value());
            info!(
                "Onion {:?} absorbed {:?}: +{} units ({} stored)",
                absorbing.onion,
                entity,
                added,
                onion.stored()
            );
            absorbed.send(LoadAbsorbed {
                onion: absorbing.onion,
                carryable: entity,
                added,
            });
            commands.entity(entity).despawn_recursive();
        }
    }
}

pub fn queue_spawn_requests(
    mut requests: EventReader<SpawnRequest>,
    mut onions: Query<&mut Onion, Without<Misconfigured>>,
) {
    for request in requests.read() {
        let Ok(mut onion) = onions.get_mut(request.onion) else {
            warn!("Spawn request for missing onion {:?}", request.onion);
            continue;
        };
        let queued = onion.request_spawn(request.count);
        if queued < request.count {
            debug!(
                "Onion {:?} only had {} of {} requested units",
                request.onion, queued, request.count
            );
        }
    }
}

/// Release one queued unit per onion when the cooldown and emergence cap allow.
pub fn spawn_from_onions(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut onions: Query<(Entity, &mut Onion, &Transform), Without<Misconfigured>>,
    emerging: Query<(), With<Emerging>>,
) {
    for (entity, mut onion, transform) in onions.iter_mut() {
        onion.emerging.retain(|&unit| emerging.contains(unit));

        if !onion.tick_spawn(config.onion.max_active_spawns) {
            continue;
        }

        let scatter = rng.point_in_disc(config.onion.spawn_radius);
        let ground = Vec3::new(
            transform.translation.x + scatter.x,
            config.world.ground_height,
            transform.translation.z + scatter.y,
        );
        let unit = commands
            .spawn(emerging_unit_bundle(onion.kind, ground, Some(entity), &config))
            .id();
        onion.spawned(unit);
        debug!("Onion {:?} released unit {:?} ({} queued)", entity, unit, onion.queued());
    }
}
