//! Buried treasure: found by treasure-finders, dug out by diggers, then carried.

mod common;

use bevy::prelude::*;
use common::*;

use pikmin_clone::carry::Carryable;
use pikmin_clone::core::SimConfig;
use pikmin_clone::treasure::{
    buried_treasure_bundle, Buried, TreasureExcavated, TreasureRevealed,
};
use pikmin_clone::units::{UnitKind, UnitState};

fn treasure_config() -> SimConfig {
    let mut config = test_config();
    config.treasure.dig_work = 10.0;
    config.treasure.dig_rate = 1.0;
    config.treasure.rise_ticks = 10;
    config
}

fn bury(app: &mut App, position: Vec3) -> Entity {
    let config = app.world().resource::<SimConfig>().treasure.clone();
    app.world_mut()
        .spawn(buried_treasure_bundle(2.0, 30, position, &config))
        .id()
}

fn height(app: &App, entity: Entity) -> f32 {
    app.world().get::<Transform>(entity).unwrap().translation.y
}

#[test]
fn buried_treasure_is_found_dug_out_and_carried() {
    let mut app = sim_app(treasure_config());
    track::<TreasureRevealed>(&mut app);
    track::<TreasureExcavated>(&mut app);

    let treasure = bury(&mut app, Vec3::ZERO);
    let red = spawn_unit(&mut app, UnitKind::Red, Vec3::new(1.0, 0.0, 0.0));
    let yellow = spawn_unit(&mut app, UnitKind::Yellow, Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(height(&app, treasure), -2.0);

    // Nobody here can find it, so nobody carries or digs it
    tick(&mut app, 5);
    assert_eq!(state_of(&app, red), UnitState::Following);
    assert_eq!(state_of(&app, yellow), UnitState::Following);
    assert!(seen::<TreasureRevealed>(&app).is_empty());
    assert_eq!(app.world().get::<Carryable>(treasure).unwrap().carrier_count(), 0);

    let white = spawn_unit(&mut app, UnitKind::White, Vec3::new(-1.0, 0.0, 0.0));
    tick(&mut app, 1);
    let revealed = seen::<TreasureRevealed>(&app);
    assert_eq!(revealed.len(), 1);
    assert_eq!(revealed[0].finder, white);
    assert_eq!(state_of(&app, white), UnitState::Digging(treasure));
    assert_eq!(state_of(&app, yellow), UnitState::Digging(treasure));
    // Red has no shovel
    assert_eq!(state_of(&app, red), UnitState::Following);

    // Two diggers at 1 work each, 10 work needed
    tick(&mut app, 3);
    assert!(seen::<TreasureExcavated>(&app).is_empty());
    tick(&mut app, 1);
    assert_eq!(seen::<TreasureExcavated>(&app).len(), 1);

    tick(&mut app, 9);
    assert!(app.world().get::<Buried>(treasure).is_some());
    assert!(height(&app, treasure) < 0.0);
    assert_eq!(state_of(&app, white), UnitState::Following);
    assert_eq!(state_of(&app, yellow), UnitState::Following);

    // Surfaced; from here on it is an ordinary load
    tick(&mut app, 1);
    assert!(app.world().get::<Buried>(treasure).is_none());
    assert!(height(&app, treasure) >= 0.0);

    tick(&mut app, 1);
    assert_eq!(state_of(&app, red), UnitState::Attached(treasure));
    assert_eq!(seen::<TreasureRevealed>(&app).len(), 1);
}

#[test]
fn finders_only_reveal_what_is_close() {
    let mut config = treasure_config();
    config.treasure.reveal_radius = 3.0;
    let mut app = sim_app(config);
    track::<TreasureRevealed>(&mut app);

    let near = bury(&mut app, Vec3::new(2.0, 0.0, 0.0));
    let far = bury(&mut app, Vec3::new(10.0, 0.0, 0.0));
    spawn_unit(&mut app, UnitKind::White, Vec3::ZERO);
    tick(&mut app, 1);

    assert!(app.world().get::<Buried>(near).unwrap().is_revealed());
    assert!(!app.world().get::<Buried>(far).unwrap().is_revealed());
    assert_eq!(seen::<TreasureRevealed>(&app).len(), 1);
}
