//! Squad roster commands driven through events.

mod common;

use bevy::prelude::*;
use common::*;

use pikmin_clone::carry::{Carryable, MotionAuthority};
use pikmin_clone::squad::{
    ChangeFormation, DismissSquad, Formation, FormationKind, Leader, Recalled, SquadManager,
    Whistle,
};
use pikmin_clone::units::{UnitKind, UnitState};

fn squad(app: &App) -> &SquadManager {
    app.world().resource::<SquadManager>()
}

#[test]
fn whistle_admits_nearest_units_up_to_capacity() {
    let mut config = test_config();
    config.squad.max_units = 3;
    let mut app = sim_app(config);

    let units: Vec<Entity> = (1..=5)
        .map(|i| spawn_unit(&mut app, UnitKind::Blue, Vec3::new(i as f32 * 2.0, 0.0, 0.0)))
        .collect();

    app.world_mut().send_event(Whistle {
        origin: Vec3::ZERO,
        radius: 20.0,
    });
    tick(&mut app, 1);

    assert_eq!(squad(&app).len(), 3);
    assert!(squad(&app).is_full());
    assert_eq!(squad(&app).members(), &units[..3]);
    assert!(!squad(&app).contains(units[4]));

    // Slots are handed out in admission order
    let slot = app.world().get::<Formation>(units[1]).unwrap().slot.unwrap();
    assert_eq!(slot.index, 1);
}

#[test]
fn whistle_ignores_units_outside_its_radius() {
    let mut app = sim_app(test_config());

    let near = spawn_unit(&mut app, UnitKind::Red, Vec3::new(3.0, 0.0, 0.0));
    let far = spawn_unit(&mut app, UnitKind::Red, Vec3::new(30.0, 0.0, 0.0));

    app.world_mut().send_event(Whistle {
        origin: Vec3::ZERO,
        radius: 5.0,
    });
    tick(&mut app, 1);

    assert!(squad(&app).contains(near));
    assert!(!squad(&app).contains(far));
}

#[test]
fn whistled_carrier_lets_go_and_does_not_grab_again_right_away() {
    let mut config = test_config();
    config.squad.recall_ticks = 10;
    let mut app = sim_app(config);

    let pellet = spawn_pellet(&mut app, 1.0, 1, Vec3::ZERO);
    let unit = spawn_unit(&mut app, UnitKind::Red, Vec3::new(1.0, 0.0, 0.0));
    tick(&mut app, 1);
    assert_eq!(state_of(&app, unit), UnitState::Attached(pellet));

    app.world_mut().send_event(Whistle {
        origin: Vec3::ZERO,
        radius: 5.0,
    });
    tick(&mut app, 1);

    assert_eq!(state_of(&app, unit), UnitState::Following);
    assert!(app.world().get::<Recalled>(unit).is_some());
    assert!(squad(&app).contains(unit));
    let carryable = app.world().get::<Carryable>(pellet).unwrap();
    assert_eq!(carryable.carrier_count(), 0);
    assert_eq!(
        *app.world().get::<MotionAuthority>(pellet).unwrap(),
        MotionAuthority::Free
    );

    tick(&mut app, 5);
    assert_eq!(state_of(&app, unit), UnitState::Following);
}

#[test]
fn dismiss_empties_the_roster_and_clears_slots() {
    let mut app = sim_app(test_config());

    let a = spawn_unit(&mut app, UnitKind::Yellow, Vec3::new(1.0, 0.0, 0.0));
    let b = spawn_unit(&mut app, UnitKind::Yellow, Vec3::new(2.0, 0.0, 0.0));
    app.world_mut().send_event(Whistle {
        origin: Vec3::ZERO,
        radius: 5.0,
    });
    tick(&mut app, 1);
    assert_eq!(squad(&app).len(), 2);

    app.world_mut().send_event(DismissSquad);
    tick(&mut app, 1);

    assert!(squad(&app).is_empty());
    for unit in [a, b] {
        assert!(app.world().get::<Formation>(unit).unwrap().slot.is_none());
        assert_eq!(state_of(&app, unit), UnitState::Following);
    }
}

#[test]
fn despawned_member_frees_its_slot() {
    let mut app = sim_app(test_config());

    let a = spawn_unit(&mut app, UnitKind::Red, Vec3::new(1.0, 0.0, 0.0));
    let b = spawn_unit(&mut app, UnitKind::Red, Vec3::new(2.0, 0.0, 0.0));
    app.world_mut().send_event(Whistle {
        origin: Vec3::ZERO,
        radius: 5.0,
    });
    tick(&mut app, 1);

    app.world_mut().despawn(a);
    tick(&mut app, 1);

    assert_eq!(squad(&app).members(), &[b]);
    assert_eq!(squad(&app).slot_of(b).map(|slot| slot.index), Some(0));
}

#[test]
fn members_walk_to_their_slot_behind_the_leader() {
    let mut config = test_config();
    config.squad.formation = FormationKind::Line;
    let mut app = sim_app(config);

    app.world_mut()
        .spawn((Leader, Transform::from_xyz(0.0, 0.0, 0.0)));
    let unit = spawn_unit(&mut app, UnitKind::White, Vec3::new(3.0, 0.0, 3.0));
    app.world_mut().send_event(Whistle {
        origin: Vec3::ZERO,
        radius: 10.0,
    });
    tick(&mut app, 1);
    let start = app.world().get::<Transform>(unit).unwrap().translation;

    tick(&mut app, 200);

    let slot = squad(&app).slot_of(unit).expect("unit is in the squad");
    let target = slot.local_offset();
    let end = app.world().get::<Transform>(unit).unwrap().translation;
    let remaining = Vec2::new(end.x - target.x, end.z - target.z).length();
    assert!(remaining <= 0.3 + 1e-4, "still {remaining} from its slot");
    assert!(remaining < Vec2::new(start.x - target.x, start.z - target.z).length());
}

#[test]
fn formation_change_reassigns_offsets() {
    let mut app = sim_app(test_config());

    let unit = spawn_unit(&mut app, UnitKind::Red, Vec3::new(1.0, 0.0, 0.0));
    app.world_mut().send_event(Whistle {
        origin: Vec3::ZERO,
        radius: 5.0,
    });
    tick(&mut app, 1);
    let ring = app.world().get::<Formation>(unit).unwrap().slot.unwrap();

    app.world_mut().send_event(ChangeFormation(FormationKind::Grid));
    tick(&mut app, 1);

    assert_eq!(squad(&app).formation(), FormationKind::Grid);
    let grid = app.world().get::<Formation>(unit).unwrap().slot.unwrap();
    assert_eq!(grid.index, 0);
    assert_ne!(grid.offset, ring.offset);
}
