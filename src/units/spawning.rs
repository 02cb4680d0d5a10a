//! Bundles for spawning units.

use bevy::prelude::*;

use super::capabilities::{Capabilities, UnitKind};
use super::components::{Ballistic, Emerging, Unit, UnitState};
use crate::carry::CarrierAgent;
use crate::combat::{Health, UnitCombat};
use crate::core::{SimConfig, TickTimer};
use crate::squad::Formation;

/// Everything a unit needs, standing at `position` in `state`.
pub fn unit_bundle(kind: UnitKind, position: Vec3, state: UnitState, config: &SimConfig) -> impl Bundle {
    (
        Unit { kind },
        Capabilities::for_kind(kind),
        state,
        Health::new(config.units.max_health),
        Ballistic::default(),
        CarrierAgent::default(),
        UnitCombat::new(&config.combat),
        Formation::default(),
        Transform::from_translation(position),
    )
}

/// A unit that starts `dig_depth` under `ground` and rises out of it.
///
/// It sits in `Landed` but nothing ticks it until the emergence finishes.
pub fn emerging_unit_bundle(
    kind: UnitKind,
    ground: Vec3,
    onion: Option<Entity>,
    config: &SimConfig,
) -> impl Bundle {
    let from_height = ground.y - config.onion.dig_depth;
    (
        unit_bundle(
            kind,
            Vec3::new(ground.x, from_height, ground.z),
            UnitState::Landed(TickTimer::new(config.units.settle_ticks)),
            config,
        ),
        Emerging {
            timer: TickTimer::new(config.units.emerge_ticks),
            from_height,
            to_height: ground.y,
            onion,
        },
    )
}
