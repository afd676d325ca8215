#![allow(dead_code)]

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use star_catcher::core::components::{Player, SessionId, SessionMember, Star};
use star_catcher::gameplay::scene::SceneAssets;
use star_catcher::gameplay::state::{SceneState, StartGame};
use star_catcher::interaction::inputmap::DirectionalInputPlugin;
use star_catcher::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use star_catcher::{GameConfig, GameplayPlugin, OverlayControl, OverlayPlugin};

fn test_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.rng_seed = Some(7);
    cfg
}

fn scene_app(app: &mut App, cfg: GameConfig) {
    app.insert_resource(cfg)
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins((DirectionalInputPlugin, GameplayPlugin, OverlayPlugin));
}

/// Headless app with everything but rendering, physics stepping and image loading.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    scene_app(&mut app, test_config());
    app.update();
    app
}

/// Same scene, stepped by a live Rapier pipeline.
pub fn physics_app() -> App {
    let cfg = test_config();
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .add_plugins(PhysicsSetupPlugin::from_config(&cfg));
    scene_app(&mut app, cfg);
    app.update();
    app
}

/// Press start and build the scene with placeholder images.
pub fn start_session(app: &mut App) -> SessionId {
    app.world_mut().send_event(StartGame);
    app.update();
    let id = app
        .world()
        .resource::<OverlayControl>()
        .current_id()
        .expect("session started");
    app.insert_resource(SceneAssets::unloaded(id));
    assert!(app.world_mut().resource_mut::<SceneState>().mark_ready());
    app.update();
    id
}

pub fn player(app: &mut App) -> Entity {
    let mut q = app.world_mut().query_filtered::<Entity, With<Player>>();
    q.single(app.world()).expect("one player")
}

pub fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let mut q = app.world_mut().query_filtered::<(), F>();
    q.iter(app.world()).count()
}

pub fn members_of(app: &mut App, id: SessionId) -> usize {
    let mut q = app.world_mut().query::<&SessionMember>();
    q.iter(app.world()).filter(|m| m.0 == id).count()
}

/// Teleport the player onto the given star entity.
pub fn move_player_onto(app: &mut App, star: Entity) {
    let at = app.world().get::<Transform>(star).expect("star").translation;
    let p = player(app);
    app.world_mut().get_mut::<Transform>(p).expect("player").translation = at;
}

pub fn star_entities(app: &mut App) -> Vec<Entity> {
    let mut q = app.world_mut().query::<(Entity, &Star)>();
    let mut stars: Vec<(Entity, usize)> = q.iter(app.world()).map(|(e, s)| (e, s.slot)).collect();
    stars.sort_by_key(|(_, slot)| *slot);
    stars.into_iter().map(|(e, _)| e).collect()
}
