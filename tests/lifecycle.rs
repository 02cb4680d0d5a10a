//! Pausing, validation, and landing.

mod common;

use bevy::prelude::*;
use common::*;

use pikmin_clone::carry::{carryable_bundle, CarryKind, Carryable};
use pikmin_clone::core::{ConfigError, Misconfigured, SimState, SimTick};
use pikmin_clone::squad::SquadManager;
use pikmin_clone::units::{unit_bundle, Ballistic, Capabilities, Unit, UnitKind, UnitState};

#[test]
fn paused_simulation_does_not_advance() {
    let mut app = sim_app(test_config());

    let pellet = spawn_pellet(&mut app, 1.0, 1, Vec3::ZERO);
    tick(&mut app, 3);
    assert_eq!(app.world().resource::<SimTick>().0, 3);

    app.world_mut()
        .resource_mut::<NextState<SimState>>()
        .set(SimState::Paused);
    spawn_unit(&mut app, UnitKind::Red, Vec3::new(1.0, 0.0, 0.0));
    tick(&mut app, 5);

    assert_eq!(app.world().resource::<SimTick>().0, 3);
    assert_eq!(app.world().get::<Carryable>(pellet).unwrap().carrier_count(), 0);

    app.world_mut()
        .resource_mut::<NextState<SimState>>()
        .set(SimState::Running);
    tick(&mut app, 1);
    assert_eq!(app.world().resource::<SimTick>().0, 4);
    assert_eq!(app.world().get::<Carryable>(pellet).unwrap().carrier_count(), 1);
}

#[test]
fn unit_without_health_is_parked_and_never_works() {
    let mut app = sim_app(test_config());

    let pellet = spawn_pellet(&mut app, 1.0, 1, Vec3::ZERO);
    let unit = app
        .world_mut()
        .spawn((
            Unit {
                kind: UnitKind::Red,
            },
            Capabilities::for_kind(UnitKind::Red),
            UnitState::Following,
            pikmin_clone::carry::CarrierAgent::default(),
            Transform::from_xyz(1.0, 0.0, 0.0),
        ))
        .id();
    tick(&mut app, 3);

    assert_eq!(
        app.world().get::<Misconfigured>(unit).map(|m| m.0.clone()),
        Some(ConfigError::UnitWithoutHealth)
    );
    assert_eq!(state_of(&app, unit), UnitState::Following);
    assert_eq!(app.world().get::<Carryable>(pellet).unwrap().carrier_count(), 0);
}

#[test]
fn weightless_carryable_is_parked() {
    let mut app = sim_app(test_config());

    let broken = app
        .world_mut()
        .spawn(carryable_bundle(0.0, CarryKind::Pellet { value: 1 }, Vec3::ZERO))
        .id();
    let unit = spawn_unit(&mut app, UnitKind::Red, Vec3::new(1.0, 0.0, 0.0));
    tick(&mut app, 3);

    assert_eq!(
        app.world().get::<Misconfigured>(broken).map(|m| m.0.clone()),
        Some(ConfigError::InvalidWeight(0.0))
    );
    assert_eq!(state_of(&app, unit), UnitState::Following);
}

#[test]
fn thrown_unit_lands_settles_and_registers() {
    let mut app = sim_app(test_config());

    let config = app
        .world()
        .resource::<pikmin_clone::core::SimConfig>()
        .clone();
    let unit = app
        .world_mut()
        .spawn(unit_bundle(
            UnitKind::Yellow,
            Vec3::new(0.0, 2.0, 0.0),
            UnitState::Airborne,
            &config,
        ))
        .id();
    app.world_mut().get_mut::<Ballistic>(unit).unwrap().velocity = Vec3::new(0.05, 0.1, 0.0);

    tick(&mut app, 10);
    assert_eq!(state_of(&app, unit), UnitState::Airborne);

    // Touches down on tick 47
    tick(&mut app, 40);
    assert!(matches!(state_of(&app, unit), UnitState::Landed(_)));
    assert_eq!(app.world().get::<Transform>(unit).unwrap().translation.y, 0.0);

    tick(&mut app, config.units.settle_ticks as usize);
    assert_eq!(state_of(&app, unit), UnitState::Following);
    assert!(app.world().resource::<SquadManager>().contains(unit));
}
