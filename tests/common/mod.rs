//! Shared harness for the headless simulation tests.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use pikmin_clone::carry::{carryable_bundle, CarryKind};
use pikmin_clone::core::{SimConfig, SimSet};
use pikmin_clone::onion::Onion;
use pikmin_clone::units::{unit_bundle, UnitKind, UnitState};
use pikmin_clone::PikminPlugin;

/// Defaults with a fast carry speed so arrivals happen in a countable number of ticks.
pub fn test_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.carry.carry_speed = 0.5;
    config.carry.arrival_distance = 1.0;
    config.carry.detection_radius = 2.0;
    config
}

/// A headless app with the whole simulation and `config` in place.
pub fn sim_app(config: SimConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(config)
        .add_plugins(PikminPlugin);
    app
}

pub fn tick(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

pub fn spawn_unit(app: &mut App, kind: UnitKind, position: Vec3) -> Entity {
    let config = app.world().resource::<SimConfig>().clone();
    app.world_mut()
        .spawn(unit_bundle(kind, position, UnitState::Following, &config))
        .id()
}

pub fn spawn_pellet(app: &mut App, weight: f32, value: u32, position: Vec3) -> Entity {
    app.world_mut()
        .spawn(carryable_bundle(weight, CarryKind::Pellet { value }, position))
        .id()
}

pub fn spawn_active_onion(app: &mut App, position: Vec3, capacity: u32) -> Entity {
    let config = app.world().resource::<SimConfig>().clone();
    app.world_mut()
        .spawn((
            Onion::active(UnitKind::Red, capacity, position.y, &config.onion),
            Transform::from_translation(position),
        ))
        .id()
}

pub fn state_of(app: &App, unit: Entity) -> UnitState {
    *app.world()
        .get::<UnitState>(unit)
        .expect("unit should exist")
}

/// Every event of type `E` seen since tracking started.
#[derive(Resource)]
pub struct Seen<E: Event> {
    pub events: Vec<E>,
}

impl<E: Event> Default for Seen<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

fn record<E: Event + Clone>(mut reader: EventReader<E>, mut seen: ResMut<Seen<E>>) {
    seen.events.extend(reader.read().cloned());
}

pub fn track<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Seen<E>>()
        .add_systems(Update, record::<E>.after(SimSet::Cleanup));
}

pub fn seen<E: Event + Clone>(app: &App) -> &[E] {
    &app.world().resource::<Seen<E>>().events
}
