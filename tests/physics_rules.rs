mod common;

use bevy::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use bevy_rapier2d::prelude::{CollisionEvent, RapierConfiguration};

use common::*;
use star_catcher::core::components::Bomb;
use star_catcher::gameplay::state::SceneState;

fn pipeline_states(app: &mut App) -> Vec<bool> {
    let mut q = app.world_mut().query::<&RapierConfiguration>();
    q.iter(app.world()).map(|rc| rc.physics_pipeline_active).collect()
}

#[test]
fn scene_build_runs_the_pipeline_with_scene_gravity() {
    let mut app = physics_app();
    start_session(&mut app);
    let mut q = app.world_mut().query::<&RapierConfiguration>();
    let configs: Vec<&RapierConfiguration> = q.iter(app.world()).collect();
    assert!(!configs.is_empty());
    for rc in configs {
        assert!(rc.physics_pipeline_active);
        assert_eq!(rc.gravity, Vec2::new(0.0, -300.0));
    }
}

#[test]
fn bomb_hit_pauses_the_whole_pipeline() {
    let mut app = physics_app();
    start_session(&mut app);
    app.update();
    assert!(pipeline_states(&mut app).iter().all(|active| *active));

    let p = player(&mut app);
    let bomb = app.world_mut().spawn(Bomb { slot: 0 }).id();
    app.world_mut().send_event(CollisionEvent::Started(p, bomb, CollisionEventFlags::empty()));
    app.update();

    assert!(app.world().resource::<SceneState>().is_game_over());
    let states = pipeline_states(&mut app);
    assert!(!states.is_empty());
    assert!(states.iter().all(|active| !*active));

    // Frozen: the player no longer falls.
    let before = app.world().get::<Transform>(p).unwrap().translation;
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(app.world().get::<Transform>(p).unwrap().translation, before);
}
