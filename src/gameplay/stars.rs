//! Collectible stars: a fixed pool of twelve, collected by overlap, revived as a
//! wave once every slot has been released.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use smallvec::SmallVec;

use crate::core::components::{HalfExtents, Player, ScoreText, SessionId, SessionMember, Star};
use crate::core::config::GameConfig;
use crate::core::frame::SceneFrame;
use crate::core::pool::FixedPool;
use crate::core::system::{configure_scene_sets, PresentationSet, RulesSet};
use crate::gameplay::bombs::{spawn_bomb, BombPool};
use crate::gameplay::scene::{SceneAssets, SceneRng};
use crate::gameplay::state::{scene_in, ScenePhase, SceneState, StarCollected};
use crate::physics::rapier::rapier_physics::star_body;

const Z_STAR: f32 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct StarSlot {
    pub entity: Entity,
    /// Scene-space column the star drops back into on every wave.
    pub spawn_x: f32,
}

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct StarPool(pub FixedPool<StarSlot>);

/// Strict AABB overlap between two centred boxes.
pub fn overlaps(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    let d = (a - b).abs();
    d.x < a_half.x + b_half.x && d.y < a_half.y + b_half.y
}

fn random_bounce(cfg: &GameConfig, rng: &mut SceneRng) -> f32 {
    let range = &cfg.stars.bounce;
    let (lo, hi) = (range.min.min(range.max), range.min.max(range.max));
    lo + rng.unit() * (hi - lo)
}

/// Spawn the row of stars and return the pool that owns them.
pub fn spawn_stars(
    commands: &mut Commands,
    cfg: &GameConfig,
    frame: &SceneFrame,
    assets: &SceneAssets,
    rng: &mut SceneRng,
    session: SessionId,
) -> StarPool {
    let stars = &cfg.stars;
    let half = stars.size.half_extents();
    let mut pool = FixedPool::with_capacity(stars.count);
    for i in 0..stars.count {
        let spawn_x = stars.start.x + stars.step_x * i as f32;
        let pos = frame.to_world(Vec2::new(spawn_x, stars.start.y));
        let slot = pool.len();
        let entity = commands
            .spawn((
                Name::new(format!("Star{slot}")),
                Star { slot },
                SessionMember(session),
                HalfExtents(half),
                Sprite::from_image(assets.star.clone()),
                star_body(half, random_bounce(cfg, rng)),
                Transform::from_translation(pos.extend(Z_STAR)),
            ))
            .id();
        if let Err(err) = pool.insert(StarSlot { entity, spawn_x }) {
            warn!(target: "stars", "Star {i} not pooled: {err}");
            commands.entity(entity).despawn();
        }
    }
    StarPool(pool)
}

/// Release every active star the player overlaps, score it and, when the last
/// one goes, revive the whole wave and drop a bomb.
#[allow(clippy::too_many_arguments)]
pub fn collect_stars(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    frame: Res<SceneFrame>,
    assets: Res<SceneAssets>,
    mut state: ResMut<SceneState>,
    mut stars: ResMut<StarPool>,
    mut bombs: ResMut<BombPool>,
    mut rng: ResMut<SceneRng>,
    players: Query<(&Transform, &HalfExtents), With<Player>>,
    mut star_q: Query<
        (&mut Transform, &HalfExtents, &mut Velocity, &mut Visibility),
        (With<Star>, Without<Player>),
    >,
    mut collected: EventWriter<StarCollected>,
) {
    if state.is_game_over() {
        return;
    }
    let Ok((player_tf, player_half)) = players.single() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();

    let hits: SmallVec<[usize; 4]> = stars
        .iter_active()
        .filter_map(|(slot, s)| {
            let (tf, half, _, _) = star_q.get(s.entity).ok()?;
            overlaps(player_pos, **player_half, tf.translation.truncate(), **half).then_some(slot)
        })
        .collect();
    if hits.is_empty() {
        return;
    }

    for slot in hits {
        let Some(s) = stars.get(slot).copied() else {
            continue;
        };
        if !stars.release(slot) {
            continue;
        }
        commands
            .entity(s.entity)
            .insert((RigidBodyDisabled, ColliderDisabled));
        if let Ok((_, _, mut vel, mut vis)) = star_q.get_mut(s.entity) {
            *vel = Velocity::zero();
            *vis = Visibility::Hidden;
        }
        let score = state.add_score(cfg.stars.score_per_star);
        collected.write(StarCollected { slot, score });
        debug!(target: "stars", "Collected star {slot}, score {score}");
    }

    if stars.count_active() > 0 {
        return;
    }
    let revived = stars.acquire_all();
    for slot in &revived {
        let Some(s) = stars.get(*slot).copied() else {
            continue;
        };
        commands
            .entity(s.entity)
            .remove::<(RigidBodyDisabled, ColliderDisabled)>();
        if let Ok((mut tf, _, mut vel, mut vis)) = star_q.get_mut(s.entity) {
            let z = tf.translation.z;
            tf.translation = frame.to_world(Vec2::new(s.spawn_x, 0.0)).extend(z);
            *vel = Velocity::zero();
            *vis = Visibility::Inherited;
        }
    }
    info!(target: "stars", "Wave cleared; {} stars back at the top", revived.len());

    let player_x = frame.to_scene(player_pos).x;
    spawn_bomb(
        &mut commands,
        &cfg,
        &frame,
        &assets,
        &mut bombs,
        &mut rng,
        player_x,
        state.session(),
    );
}

/// Score label follows the latest collection of the frame.
pub fn update_score_label(
    cfg: Res<GameConfig>,
    mut collected: EventReader<StarCollected>,
    mut labels: Query<&mut Text2d, With<ScoreText>>,
) {
    let Some(last) = collected.read().last() else {
        return;
    };
    for mut text in &mut labels {
        text.0 = format!("{}{}", cfg.score_text.prefix, last.score);
    }
}

pub struct StarsPlugin;

impl Plugin for StarsPlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        app.add_event::<StarCollected>()
            .add_systems(
                Update,
                collect_stars
                    .in_set(RulesSet)
                    .run_if(scene_in(ScenePhase::Playing))
                    .run_if(resource_exists::<StarPool>)
                    .run_if(resource_exists::<BombPool>),
            )
            .add_systems(Update, update_score_label.in_set(PresentationSet));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let h = Vec2::splat(10.0);
        assert!(overlaps(Vec2::ZERO, h, Vec2::new(19.0, 0.0), h));
        assert!(!overlaps(Vec2::ZERO, h, Vec2::new(20.0, 0.0), h), "touching edges");
        assert!(!overlaps(Vec2::ZERO, h, Vec2::new(5.0, 25.0), h));
    }

    #[test]
    fn default_row_spans_the_field() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Startup, |mut commands: Commands| {
            let cfg = GameConfig::default();
            let mut rng = SceneRng::from_seed(Some(1));
            let pool = spawn_stars(
                &mut commands,
                &cfg,
                &SceneFrame::default(),
                &SceneAssets::unloaded(SessionId(1)),
                &mut rng,
                SessionId(1),
            );
            commands.insert_resource(pool);
        });
        app.update();
        let pool = app.world().resource::<StarPool>();
        assert_eq!(pool.len(), 12);
        assert_eq!(pool.count_active(), 12);
        let xs: Vec<f32> = pool.iter().map(|(_, s)| s.spawn_x).collect();
        assert_eq!(xs.first(), Some(&12.0));
        assert_eq!(xs.last(), Some(&782.0));
    }
}
