mod common;

use bevy::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use bevy_rapier2d::prelude::{CollisionEvent, GravityScale, Restitution, Velocity};

use common::*;
use star_catcher::core::components::{Bomb, ScoreText};
use star_catcher::core::frame::SceneFrame;
use star_catcher::gameplay::bombs::BombPool;
use star_catcher::gameplay::stars::StarPool;
use star_catcher::gameplay::state::SceneState;

fn park_player(app: &mut App) {
    let p = player(app);
    app.world_mut().get_mut::<Transform>(p).unwrap().translation = Vec3::new(0.0, -500.0, 1.0);
}

#[test]
fn each_star_is_worth_ten() {
    let mut app = headless_app();
    start_session(&mut app);
    let stars = star_entities(&mut app);
    assert_eq!(stars.len(), 12);

    for (i, star) in [stars[3], stars[0], stars[9]].into_iter().enumerate() {
        move_player_onto(&mut app, star);
        app.update();
        park_player(&mut app);
        assert_eq!(app.world().resource::<SceneState>().score(), 10 * (i as u32 + 1));
        assert_eq!(app.world().get::<Visibility>(star), Some(&Visibility::Hidden));
    }
    assert_eq!(app.world().resource::<StarPool>().count_active(), 9);

    let mut q = app.world_mut().query_filtered::<&Text2d, With<ScoreText>>();
    assert_eq!(q.single(app.world()).unwrap().0, "Score: 30");
}

#[test]
fn clearing_a_wave_revives_all_stars_and_drops_one_bomb_opposite() {
    let mut app = headless_app();
    start_session(&mut app);
    let stars = star_entities(&mut app);

    for star in &stars {
        move_player_onto(&mut app, *star);
        app.update();
    }
    // Last star sits at x=782, right of the midpoint.
    park_player(&mut app);
    app.update();

    assert_eq!(app.world().resource::<SceneState>().score(), 120);
    assert_eq!(app.world().resource::<StarPool>().count_active(), 12);
    assert_eq!(app.world().resource::<BombPool>().len(), 1);
    assert_eq!(count::<With<Bomb>>(&mut app), 1);

    let frame = *app.world().resource::<SceneFrame>();
    let mut q = app.world_mut().query_filtered::<&Transform, With<Bomb>>();
    let bomb_x = frame.to_scene(q.single(app.world()).unwrap().translation.truncate()).x;
    assert!((0.0..=400.0).contains(&bomb_x), "bomb at {bomb_x}");

    for star in &stars {
        let tf = app.world().get::<Transform>(*star).unwrap();
        assert_eq!(frame.to_scene(tf.translation.truncate()).y, 0.0);
        assert_ne!(app.world().get::<Visibility>(*star), Some(&Visibility::Hidden));
        let bounce = app.world().get::<Restitution>(*star).unwrap().coefficient;
        assert!((0.4..=0.8).contains(&bounce), "star bounce {bounce}");
    }

    let mut q = app
        .world_mut()
        .query_filtered::<(&GravityScale, &Restitution, &Velocity), With<Bomb>>();
    let (gravity, restitution, velocity) = q.single(app.world()).unwrap();
    assert_eq!(gravity.0, 0.0);
    assert_eq!(restitution.coefficient, 1.0);
    // Scene-space (vx, 20) launch, y flipped into world space.
    assert_eq!(velocity.linvel.y, -20.0);
    assert_eq!(velocity.linvel.x.fract(), 0.0);
    assert!(velocity.linvel.x.abs() <= 200.0);
}

#[test]
fn arrows_drive_the_player_until_game_over() {
    let mut app = headless_app();
    start_session(&mut app);
    let p = player(&mut app);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::ArrowLeft);
    app.update();
    assert_eq!(app.world().get::<Velocity>(p).unwrap().linvel.x, -160.0);

    let bomb = app.world_mut().spawn(Bomb { slot: 0 }).id();
    app.world_mut().send_event(CollisionEvent::Started(p, bomb, CollisionEventFlags::empty()));
    app.update();
    assert!(app.world().resource::<SceneState>().is_game_over());

    app.world_mut().get_mut::<Velocity>(p).unwrap().linvel = Vec2::new(12.0, -3.0);
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::ArrowLeft);
        keys.press(KeyCode::ArrowRight);
        keys.press(KeyCode::ArrowUp);
    }
    app.update();
    assert_eq!(app.world().get::<Velocity>(p).unwrap().linvel, Vec2::new(12.0, -3.0));
}
