use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{FootSensor, GroundContacts, Player};
use crate::core::config::GameConfig;
use crate::core::system::{configure_scene_sets, InputSet};
use crate::gameplay::animation::{AnimationLibrary, ClipName, SpriteAnimator};
use crate::gameplay::state::{scene_in, ScenePhase, SceneState};
use crate::interaction::inputmap::DirectionalInput;

/// Count foot-sensor contacts so jumping only works while resting on something.
pub fn track_ground_contacts(
    mut collisions: EventReader<CollisionEvent>,
    sensors: Query<&FootSensor>,
    mut contacts: Query<&mut GroundContacts>,
) {
    for ev in collisions.read() {
        let (a, b, started) = match ev {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };
        for sensor in [a, b].into_iter().filter_map(|e| sensors.get(e).ok()) {
            let Ok(mut c) = contacts.get_mut(sensor.owner) else {
                continue;
            };
            c.0 = if started { c.0 + 1 } else { c.0.saturating_sub(1) };
        }
    }
}

/// Horizontal run, idle and single jump.
pub fn drive_player(
    input: Res<DirectionalInput>,
    cfg: Res<GameConfig>,
    state: Res<SceneState>,
    library: Res<AnimationLibrary>,
    mut players: Query<(&mut Velocity, &mut SpriteAnimator, &GroundContacts), With<Player>>,
) {
    if state.is_game_over() {
        return;
    }
    let speed = cfg.player.run_speed;
    for (mut vel, mut animator, contacts) in &mut players {
        if input.left {
            vel.linvel.x = -speed;
            animator.play(ClipName::Left, &library);
        } else if input.right {
            vel.linvel.x = speed;
            animator.play(ClipName::Right, &library);
        } else {
            vel.linvel.x = 0.0;
            animator.play(ClipName::Turn, &library);
        }
        if input.up && contacts.is_grounded() {
            vel.linvel.y = cfg.player.jump_speed;
        }
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        app.add_event::<CollisionEvent>().add_systems(
            Update,
            (track_ground_contacts, drive_player)
                .chain()
                .in_set(InputSet)
                .run_if(scene_in(ScenePhase::Playing)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::SessionId;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn app_with_player(contacts: u32) -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<GameConfig>()
            .init_resource::<AnimationLibrary>()
            .init_resource::<DirectionalInput>()
            .add_plugins(PlayerPlugin);
        let mut state = SceneState::new(SessionId(1));
        state.mark_ready();
        state.begin_play();
        app.insert_resource(state);
        let lib = AnimationLibrary::default();
        let player = app
            .world_mut()
            .spawn((
                Player,
                Velocity::zero(),
                GroundContacts(contacts),
                SpriteAnimator::new(ClipName::Turn, &lib),
            ))
            .id();
        (app, player)
    }

    #[test]
    fn jump_requires_ground() {
        let (mut app, player) = app_with_player(0);
        app.insert_resource(DirectionalInput { up: true, ..default() });
        app.update();
        assert_eq!(app.world().get::<Velocity>(player).unwrap().linvel.y, 0.0);

        app.world_mut().get_mut::<GroundContacts>(player).unwrap().0 = 1;
        app.update();
        assert_eq!(app.world().get::<Velocity>(player).unwrap().linvel.y, 330.0);
    }

    #[test]
    fn left_runs_and_selects_clip() {
        let (mut app, player) = app_with_player(1);
        app.insert_resource(DirectionalInput { left: true, ..default() });
        app.update();
        let world = app.world();
        assert_eq!(world.get::<Velocity>(player).unwrap().linvel.x, -160.0);
        assert_eq!(world.get::<SpriteAnimator>(player).unwrap().clip(), ClipName::Left);
    }

    #[test]
    fn foot_sensor_events_count_contacts() {
        let (mut app, player) = app_with_player(0);
        let sensor = app.world_mut().spawn(FootSensor { owner: player }).id();
        let ground = app.world_mut().spawn_empty().id();
        app.world_mut().send_event(CollisionEvent::Started(
            sensor,
            ground,
            CollisionEventFlags::SENSOR,
        ));
        app.update();
        assert!(app.world().get::<GroundContacts>(player).unwrap().is_grounded());
        app.world_mut().send_event(CollisionEvent::Stopped(
            ground,
            sensor,
            CollisionEventFlags::SENSOR,
        ));
        app.update();
        assert!(!app.world().get::<GroundContacts>(player).unwrap().is_grounded());
    }
}
