//! Elemental hazards against unit capabilities.

mod common;

use bevy::prelude::*;
use common::*;

use pikmin_clone::carry::{Carryable, MotionAuthority};
use pikmin_clone::combat::Health;
use pikmin_clone::hazards::{Hazard, UnitFrozen};
use pikmin_clone::units::{HazardKind, UnitKind, UnitState};

fn spawn_hazard(app: &mut App, kind: HazardKind, radius: f32, damage: f32) -> Entity {
    let mut hazard = Hazard::new(kind, radius);
    hazard.damage_per_tick = damage;
    app.world_mut()
        .spawn((hazard, Transform::from_translation(Vec3::ZERO)))
        .id()
}

#[test]
fn fire_burns_everyone_but_red() {
    let mut app = sim_app(test_config());

    spawn_hazard(&mut app, HazardKind::Fire, 3.0, 5.0);
    let red = spawn_unit(&mut app, UnitKind::Red, Vec3::new(1.0, 0.0, 0.0));
    let blue = spawn_unit(&mut app, UnitKind::Blue, Vec3::new(-1.0, 0.0, 0.0));
    let outside = spawn_unit(&mut app, UnitKind::Blue, Vec3::new(10.0, 0.0, 0.0));

    tick(&mut app, 1);
    assert_eq!(app.world().get::<Health>(blue).unwrap().current, 5.0);

    tick(&mut app, 1);
    assert!(!app.world().entities().contains(blue));
    assert_eq!(app.world().get::<Health>(red).unwrap().current, 10.0);
    assert_eq!(app.world().get::<Health>(outside).unwrap().current, 10.0);
}

#[test]
fn water_is_survived_by_blue() {
    let mut app = sim_app(test_config());

    spawn_hazard(&mut app, HazardKind::Water, 3.0, 1.0);
    let blue = spawn_unit(&mut app, UnitKind::Blue, Vec3::ZERO);
    let yellow = spawn_unit(&mut app, UnitKind::Yellow, Vec3::new(0.5, 0.0, 0.0));
    tick(&mut app, 3);

    assert_eq!(app.world().get::<Health>(blue).unwrap().current, 10.0);
    assert_eq!(app.world().get::<Health>(yellow).unwrap().current, 7.0);
}

#[test]
fn red_units_wear_a_fire_down_until_it_goes_out() {
    let mut app = sim_app(test_config());

    let fire = spawn_hazard(&mut app, HazardKind::Fire, 3.0, 1.0);
    app.world_mut().entity_mut(fire).insert(Health::new(0.3));
    spawn_unit(&mut app, UnitKind::Red, Vec3::ZERO);
    spawn_unit(&mut app, UnitKind::Red, Vec3::new(1.0, 0.0, 0.0));

    tick(&mut app, 1);
    assert!(app.world().entities().contains(fire));

    tick(&mut app, 1);
    assert!(!app.world().entities().contains(fire));
}

#[test]
fn cold_freezes_a_carrier_off_its_load() {
    let mut config = test_config();
    config.units.freeze_ticks = 5;
    let mut app = sim_app(config);
    track::<UnitFrozen>(&mut app);

    let pellet = spawn_pellet(&mut app, 1.0, 1, Vec3::new(0.5, 0.0, 0.0));
    spawn_hazard(&mut app, HazardKind::Cold, 2.0, 0.0);
    let unit = spawn_unit(&mut app, UnitKind::Red, Vec3::ZERO);

    tick(&mut app, 1);
    assert!(matches!(state_of(&app, unit), UnitState::Frozen(_)));

    tick(&mut app, 1);
    let carryable = app.world().get::<Carryable>(pellet).unwrap();
    assert_eq!(carryable.carrier_count(), 0);
    assert_eq!(
        *app.world().get::<MotionAuthority>(pellet).unwrap(),
        MotionAuthority::Free
    );
    assert!(matches!(state_of(&app, unit), UnitState::Frozen(_)));
    assert_eq!(seen::<UnitFrozen>(&app).len(), 1);
    assert_eq!(app.world().get::<Health>(unit).unwrap().current, 10.0);
}

#[test]
fn frozen_units_thaw_after_the_freeze_duration() {
    let mut config = test_config();
    config.units.freeze_ticks = 5;
    let mut app = sim_app(config);

    let ice = spawn_hazard(&mut app, HazardKind::Cold, 2.0, 0.0);
    let unit = spawn_unit(&mut app, UnitKind::Blue, Vec3::ZERO);
    tick(&mut app, 1);
    assert!(matches!(state_of(&app, unit), UnitState::Frozen(_)));

    app.world_mut().despawn(ice);
    tick(&mut app, 5);
    assert_eq!(state_of(&app, unit), UnitState::Following);
}
