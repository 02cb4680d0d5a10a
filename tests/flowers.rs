//! Pellet flowers: knocked down for a pellet, then growing back.

mod common;

use bevy::prelude::*;
use common::*;

use pikmin_clone::carry::{CarryKind, Carryable};
use pikmin_clone::combat::Health;
use pikmin_clone::enemies::Hostile;
use pikmin_clone::flowers::{pellet_flower_bundle, PelletDropped, PelletFlower};
use pikmin_clone::units::{UnitKind, UnitState};

#[test]
fn knocked_down_flower_drops_a_pellet_and_grows_back() {
    let mut config = test_config();
    config.combat.latch_chance = 0.0;
    let mut app = sim_app(config);
    track::<PelletDropped>(&mut app);

    let flower = app
        .world_mut()
        .spawn(pellet_flower_bundle(
            PelletFlower::new(1.0, 3, 1.0, 10),
            Vec3::new(1.0, 0.0, 0.0),
        ))
        .id();
    let unit = spawn_unit(&mut app, UnitKind::Red, Vec3::ZERO);

    // One hit is enough
    tick(&mut app, 1);
    let dropped = seen::<PelletDropped>(&app);
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].flower, flower);
    let pellet = dropped[0].pellet;

    assert!(app.world().entities().contains(flower));
    assert!(app.world().get::<Hostile>(flower).is_none());
    assert!(!app.world().get::<PelletFlower>(flower).unwrap().is_blooming());
    let carryable = app.world().get::<Carryable>(pellet).unwrap();
    assert_eq!(carryable.kind, CarryKind::Pellet { value: 3 });

    // Stops fighting, then picks up what fell
    tick(&mut app, 2);
    assert_eq!(state_of(&app, unit), UnitState::Attached(pellet));

    tick(&mut app, 6);
    assert!(app.world().get::<Hostile>(flower).is_none());

    tick(&mut app, 2);
    assert!(app.world().get::<PelletFlower>(flower).unwrap().is_blooming());
    assert!(app.world().get::<Hostile>(flower).is_some());
    assert_eq!(app.world().get::<Health>(flower).unwrap().current, 1.0);
    assert_eq!(seen::<PelletDropped>(&app).len(), 1);
}
