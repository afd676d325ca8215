//! Bouncing hazards. One is dropped per cleared wave into the half of the field
//! away from the player; touching any of them ends the session.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::core::components::{Bomb, Player, SessionId, SessionMember};
use crate::core::config::{parse_hex_color, GameConfig};
use crate::core::frame::SceneFrame;
use crate::core::pool::FixedPool;
use crate::core::system::{configure_scene_sets, RulesSet};
use crate::gameplay::animation::{AnimationLibrary, ClipName, SpriteAnimator};
use crate::gameplay::scene::{SceneAssets, SceneRng};
use crate::gameplay::stars::collect_stars;
use crate::gameplay::state::{scene_in, GameOver, ScenePhase, SceneState};
use crate::physics::rapier::rapier_physics::{bomb_body, pause_physics};

const Z_BOMB: f32 = 2.0;

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct BombPool {
    #[deref]
    slots: FixedPool<Entity>,
    /// Next slot handed out once every slot is filled; oldest first.
    recycle: usize,
}

impl BombPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: FixedPool::with_capacity(capacity),
            recycle: 0,
        }
    }

    /// Oldest filled slot, advancing round-robin. `None` until the pool is full.
    fn take_oldest(&mut self) -> Option<(usize, Entity)> {
        if !self.slots.is_full() {
            return None;
        }
        let slot = self.recycle;
        let entity = *self.slots.get(slot)?;
        self.recycle = (slot + 1) % self.slots.capacity();
        Some((slot, entity))
    }
}

/// Integer column in the half opposite `player_x` (both ends inclusive).
pub fn bomb_spawn_x(player_x: f32, frame: &SceneFrame, rng: &mut impl Rng) -> f32 {
    let mid = frame.mid_x().round() as i32;
    let width = frame.width.round() as i32;
    let (lo, hi) = if player_x < frame.mid_x() {
        (mid, width)
    } else {
        (0, mid)
    };
    rng.gen_range(lo..=hi) as f32
}

/// Scene-space launch velocity: random integer x, fixed downward y.
pub fn bomb_velocity(cfg: &GameConfig, rng: &mut impl Rng) -> Vec2 {
    let range = &cfg.bombs.velocity_x;
    let (lo, hi) = (range.min.min(range.max), range.min.max(range.max));
    Vec2::new(rng.gen_range(lo..=hi) as f32, cfg.bombs.velocity_y)
}

/// Drop a bomb for the wave just cleared. Once the pool is full the oldest bomb is
/// relaunched from the new spawn point instead.
#[allow(clippy::too_many_arguments)]
pub fn spawn_bomb(
    commands: &mut Commands,
    cfg: &GameConfig,
    frame: &SceneFrame,
    assets: &SceneAssets,
    pool: &mut BombPool,
    rng: &mut SceneRng,
    player_x: f32,
    session: SessionId,
) -> Option<Entity> {
    if pool.capacity() == 0 {
        warn!(target: "bombs", "Bomb pool has no slots, skipping spawn");
        return None;
    }
    let x = bomb_spawn_x(player_x, frame, &mut rng.0);
    let velocity = frame.velocity_to_world(bomb_velocity(cfg, &mut rng.0));
    let pos = frame.to_world(Vec2::new(x, cfg.bombs.spawn_y));
    if let Some((slot, entity)) = pool.take_oldest() {
        commands.entity(entity).insert((
            Transform::from_translation(pos.extend(Z_BOMB)),
            Velocity::linear(velocity),
            Visibility::Inherited,
        ));
        info!(target: "bombs", "Bomb {slot} recycled at x={x} vx={}", velocity.x);
        return Some(entity);
    }
    let slot = pool.len();
    let entity = commands
        .spawn((
            Name::new(format!("Bomb{slot}")),
            Bomb { slot },
            SessionMember(session),
            Sprite::from_image(assets.bomb.clone()),
            bomb_body(cfg.bombs.radius, cfg.bombs.bounce, velocity),
            Transform::from_translation(pos.extend(Z_BOMB)),
        ))
        .id();
    match pool.insert(entity) {
        Ok(_) => {
            info!(target: "bombs", "Bomb {slot} dropped at x={x} vx={}", velocity.x);
            Some(entity)
        }
        Err(err) => {
            warn!(target: "bombs", "Bomb not pooled: {err}");
            commands.entity(entity).despawn();
            None
        }
    }
}

/// Player touched a bomb: latch game over, freeze physics, tint and face the camera.
#[allow(clippy::too_many_arguments)]
pub fn handle_bomb_hits(
    mut collisions: EventReader<CollisionEvent>,
    cfg: Res<GameConfig>,
    library: Res<AnimationLibrary>,
    mut state: ResMut<SceneState>,
    bombs: Query<(), With<Bomb>>,
    mut players: Query<(&mut Sprite, &mut SpriteAnimator), With<Player>>,
    mut rapier: Query<&mut RapierConfiguration>,
    mut game_over: EventWriter<GameOver>,
) {
    for ev in collisions.read() {
        let &CollisionEvent::Started(a, b, _) = ev else {
            continue;
        };
        let hit = (players.contains(a) && bombs.contains(b))
            || (players.contains(b) && bombs.contains(a));
        if !hit || !state.end() {
            continue;
        }
        pause_physics(&mut rapier);
        let tint = parse_hex_color(&cfg.player.hit_tint, Color::srgb(1.0, 0.0, 0.0));
        for (mut sprite, mut animator) in &mut players {
            sprite.color = tint;
            animator.restart(ClipName::Turn, &library);
        }
        game_over.write(GameOver {
            session: state.session(),
            score: state.score(),
        });
        info!(target: "bombs", "Game over for session {} at score {}", state.session().0, state.score());
    }
}

pub struct BombsPlugin;

impl Plugin for BombsPlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        app.add_event::<GameOver>()
            .add_event::<CollisionEvent>()
            .add_systems(
                Update,
                handle_bomb_hits
                    .in_set(RulesSet)
                    .after(collect_stars)
                    .run_if(scene_in(ScenePhase::Playing)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bomb_lands_in_the_opposite_half() {
        let frame = SceneFrame::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..64 {
            let right = bomb_spawn_x(100.0, &frame, &mut rng);
            assert!((400.0..=800.0).contains(&right));
            let left = bomb_spawn_x(400.0, &frame, &mut rng);
            assert!((0.0..=400.0).contains(&left), "mid counts as the right half");
        }
    }

    #[test]
    fn full_pool_relaunches_the_oldest_bomb() {
        let mut cfg = GameConfig::default();
        cfg.bombs.capacity = 2;
        let mut app = App::new();
        app.insert_resource(cfg.clone())
            .insert_resource(BombPool::with_capacity(cfg.bombs.capacity))
            .insert_resource(SceneRng::from_seed(Some(5)));
        let mut spawned = Vec::new();
        for _ in 0..4 {
            let entity = app
                .world_mut()
                .run_system_once(
                    |mut commands: Commands,
                     cfg: Res<GameConfig>,
                     mut pool: ResMut<BombPool>,
                     mut rng: ResMut<SceneRng>| {
                        spawn_bomb(
                            &mut commands,
                            &cfg,
                            &SceneFrame::default(),
                            &SceneAssets::unloaded(SessionId(1)),
                            &mut pool,
                            &mut rng,
                            100.0,
                            SessionId(1),
                        )
                    },
                )
                .expect("spawn system runs");
            spawned.push(entity.expect("a bomb every wave"));
        }
        assert_eq!(spawned[2], spawned[0]);
        assert_eq!(spawned[3], spawned[1]);
        assert_eq!(app.world().resource::<BombPool>().len(), 2);
        let mut bombs = app.world_mut().query::<(&Bomb, &Velocity)>();
        assert_eq!(bombs.iter(app.world()).count(), 2);
        for (_, v) in bombs.iter(app.world()) {
            assert_eq!(v.linvel.y, -20.0);
        }
    }

    #[test]
    fn velocity_is_integral_and_falls() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..32 {
            let v = bomb_velocity(&cfg, &mut rng);
            assert_eq!(v.x.fract(), 0.0);
            assert!((-200.0..=200.0).contains(&v.x));
            assert_eq!(v.y, 20.0);
        }
    }
}
