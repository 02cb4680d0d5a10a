//! Roaming hostiles: patrolling their territory, chasing and biting the leader.

mod common;

use bevy::prelude::*;
use common::*;

use pikmin_clone::combat::{Dead, Health, UnitCombat};
use pikmin_clone::core::{horizontal_distance, DeathEvent, SimConfig, TickTimer};
use pikmin_clone::enemies::{AiState, AttackTimer, Hostile, HostileStats, Patrol};
use pikmin_clone::squad::{Leader, SquadManager};
use pikmin_clone::units::{UnitKind, UnitState};

fn stats() -> HostileStats {
    HostileStats {
        damage: 10.0,
        patrol_speed: 0.2,
        chase_speed: 0.5,
        detection_range: 8.0,
        attack_range: 1.6,
    }
}

fn spawn_roamer(app: &mut App, stats: HostileStats, home: Vec3, radius: f32) -> Entity {
    app.world_mut()
        .spawn((
            Hostile {
                name: "Roamer".to_string(),
            },
            Health::new(1000.0),
            Transform::from_translation(home),
            AiState::default(),
            stats,
            Patrol::new(home, radius, 0),
            AttackTimer(TickTimer::new(5)),
        ))
        .id()
}

fn spawn_leader(app: &mut App, health: f32, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Leader, Health::new(health), Transform::from_translation(position)))
        .id()
}

fn ai_state(app: &App, hostile: Entity) -> AiState {
    *app.world().get::<AiState>(hostile).unwrap()
}

fn position(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).unwrap().translation
}

#[test]
fn hostile_chases_and_bites_the_leader_until_they_fall() {
    let mut app = sim_app(test_config());
    track::<DeathEvent>(&mut app);

    let hostile = spawn_roamer(&mut app, stats(), Vec3::ZERO, 10.0);
    let leader = spawn_leader(&mut app, 30.0, Vec3::new(6.0, 0.0, 0.0));
    let follower = spawn_unit(&mut app, UnitKind::Red, Vec3::new(-30.0, 0.0, 0.0));
    app.world_mut().resource_mut::<SquadManager>().register(follower);

    tick(&mut app, 9);
    assert_eq!(ai_state(&app, hostile), AiState::Chasing);
    assert!((position(&app, hostile).x - 4.5).abs() < 1e-5);

    tick(&mut app, 1);
    assert_eq!(ai_state(&app, hostile), AiState::Attacking);

    // First bite once the cooldown has run from the moment it got in reach
    tick(&mut app, 3);
    assert_eq!(app.world().get::<Health>(leader).unwrap().current, 30.0);
    tick(&mut app, 1);
    assert_eq!(app.world().get::<Health>(leader).unwrap().current, 20.0);

    tick(&mut app, 10);
    assert!(app.world().get::<Dead>(leader).is_some());
    let deaths = seen::<DeathEvent>(&app);
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].entity, leader);
    assert_eq!(deaths[0].killed_by, Some(hostile));
    assert!(app.world().resource::<SquadManager>().is_empty());

    tick(&mut app, 1);
    assert_eq!(ai_state(&app, hostile), AiState::Patrolling);
}

#[test]
fn leader_outside_the_territory_is_left_alone() {
    let mut app = sim_app(test_config());

    let hostile = spawn_roamer(&mut app, stats(), Vec3::ZERO, 3.0);
    spawn_leader(&mut app, 30.0, Vec3::new(5.0, 0.0, 0.0));

    for _ in 0..30 {
        tick(&mut app, 1);
        assert_eq!(ai_state(&app, hostile), AiState::Patrolling);
    }
}

#[test]
fn chase_stops_at_the_edge_of_the_territory() {
    let mut app = sim_app(test_config());

    let hostile = spawn_roamer(&mut app, stats(), Vec3::ZERO, 4.0);
    let leader = spawn_leader(&mut app, 30.0, Vec3::new(3.5, 0.0, 0.0));
    tick(&mut app, 1);
    assert_eq!(ai_state(&app, hostile), AiState::Chasing);

    // Walks off; still in detection range but out of the territory
    app.world_mut().get_mut::<Transform>(leader).unwrap().translation = Vec3::new(7.0, 0.0, 0.0);
    tick(&mut app, 1);
    assert_eq!(ai_state(&app, hostile), AiState::Patrolling);
    assert!(horizontal_distance(position(&app, hostile), Vec3::ZERO) <= 4.0 + 1e-5);
}

#[test]
fn patrol_wanders_but_never_leaves_home() {
    let mut app = sim_app(test_config());

    let home = Vec3::new(5.0, 0.0, -5.0);
    let hostile = spawn_roamer(&mut app, stats(), home, 3.0);

    let mut moved = false;
    for _ in 0..200 {
        tick(&mut app, 1);
        let at = position(&app, hostile);
        assert!(horizontal_distance(at, home) <= 3.0 + 1e-4);
        moved |= horizontal_distance(at, home) > 0.1;
    }
    assert!(moved);
}

#[test]
fn latched_unit_rides_a_chasing_hostile() {
    let mut config: SimConfig = test_config();
    config.combat.latch_chance = 1.0;
    config.combat.attack_interval = 1000;
    let mut app = sim_app(config);

    let hostile = spawn_roamer(&mut app, stats(), Vec3::ZERO, 10.0);
    spawn_leader(&mut app, 1000.0, Vec3::new(7.0, 0.0, 0.0));
    let unit = spawn_unit(&mut app, UnitKind::Blue, Vec3::new(0.0, 0.0, 1.0));

    tick(&mut app, 6);
    assert_eq!(state_of(&app, unit), UnitState::Latched(hostile));
    let hostile_at = position(&app, hostile);
    assert!(hostile_at.x > 2.0);

    let offset = app.world().get::<UnitCombat>(unit).unwrap().latch_offset;
    assert!((position(&app, unit) - (hostile_at + offset)).length() < 1e-4);
}
