//! Per-session scene lifecycle: reset on a new session, load the five images,
//! wait for them to settle, then build the object graph once.
use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::components::{
    Background, FootSensor, GroundContacts, HalfExtents, Platform, Player, ScoreText, SessionId,
    SessionMember,
};
use crate::core::config::{parse_hex_color, GameConfig};
use crate::core::frame::SceneFrame;
use crate::core::system::{configure_scene_sets, LifecycleSet};
use crate::gameplay::animation::{AnimationLibrary, ClipName, SpriteAnimator};
use crate::gameplay::bombs::BombPool;
use crate::gameplay::state::{scene_in, ScenePhase, SceneState, SessionStarted};
use crate::gameplay::stars::{spawn_stars, StarPool};
use crate::physics::rapier::rapier_physics::{
    activate_physics, foot_sensor, platform_body, player_body, spawn_world_bounds,
};

const BACKGROUND_CENTER: Vec2 = Vec2::new(400.0, 300.0);
const Z_BACKGROUND: f32 = -10.0;
const Z_PLATFORM: f32 = 0.0;
const Z_ACTOR: f32 = 1.0;
const Z_LABEL: f32 = 5.0;

/// Image handles requested by one session.
#[derive(Resource, Debug, Clone)]
pub struct SceneAssets {
    pub session: SessionId,
    pub sky: Handle<Image>,
    pub ground: Handle<Image>,
    pub star: Handle<Image>,
    pub bomb: Handle<Image>,
    pub dude: Handle<Image>,
    pub dude_layout: Handle<TextureAtlasLayout>,
}

impl SceneAssets {
    /// Handles that point at nothing; sprites built from them render blank.
    pub fn unloaded(session: SessionId) -> Self {
        Self {
            session,
            sky: Handle::default(),
            ground: Handle::default(),
            star: Handle::default(),
            bomb: Handle::default(),
            dude: Handle::default(),
            dude_layout: Handle::default(),
        }
    }

    fn images(&self) -> [(&'static str, &Handle<Image>); 5] {
        [
            ("sky", &self.sky),
            ("ground", &self.ground),
            ("star", &self.star),
            ("bomb", &self.bomb),
            ("dude", &self.dude),
        ]
    }
}

/// Randomness for star bounce, bomb column and bomb velocity.
#[derive(Resource, Deref, DerefMut)]
pub struct SceneRng(pub StdRng);

impl SceneRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self(StdRng::seed_from_u64(s)),
            None => Self(StdRng::from_entropy()),
        }
    }

    pub fn unit(&mut self) -> f32 {
        self.0.gen_range(0.0..=1.0)
    }
}

/// Reset per-session resources when the overlay starts a new session.
pub fn begin_session(mut commands: Commands, mut started: EventReader<SessionStarted>) {
    let Some(ev) = started.read().last().copied() else {
        return;
    };
    commands.remove_resource::<SceneAssets>();
    commands.remove_resource::<StarPool>();
    commands.remove_resource::<BombPool>();
    commands.insert_resource(SceneState::new(ev.session));
    info!(target: "scene", "Session {} loading", ev.session.0);
}

/// Request the images once, then poll until every handle has either loaded or failed.
pub fn load_scene_assets(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut state: ResMut<SceneState>,
    assets: Option<Res<SceneAssets>>,
) {
    let assets = match assets {
        Some(a) if a.session == state.session() => a,
        _ => {
            let a = &cfg.assets;
            let anim = &cfg.animation;
            let layout = TextureAtlasLayout::from_grid(
                UVec2::new(anim.frame_size.width as u32, anim.frame_size.height as u32),
                anim.columns.max(1),
                anim.rows.max(1),
                None,
                None,
            );
            commands.insert_resource(SceneAssets {
                session: state.session(),
                sky: server.load(a.sky.clone()),
                ground: server.load(a.ground.clone()),
                star: server.load(a.star.clone()),
                bomb: server.load(a.bomb.clone()),
                dude: server.load(a.dude.clone()),
                dude_layout: layouts.add(layout),
            });
            return;
        }
    };

    let mut failed = 0usize;
    for (name, handle) in assets.images() {
        match server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {}
            Some(LoadState::Failed(err)) => {
                failed += 1;
                error!(target: "scene", "Asset '{name}' failed to load: {err}");
            }
            _ => return,
        }
    }
    if state.mark_ready() {
        if failed > 0 {
            warn!(target: "scene", "Session {} ready with {failed} missing images", state.session().0);
        } else {
            info!(target: "scene", "Session {} assets ready", state.session().0);
        }
    }
}

/// Build the scene graph for the current session and enter `Playing`.
#[allow(clippy::too_many_arguments)]
pub fn build_scene(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    frame: Res<SceneFrame>,
    library: Res<AnimationLibrary>,
    assets: Res<SceneAssets>,
    mut rng: ResMut<SceneRng>,
    mut state: ResMut<SceneState>,
    mut rapier: Query<&mut RapierConfiguration>,
) {
    let session = state.session();
    let member = SessionMember(session);

    commands.spawn((
        Name::new("Sky"),
        Background,
        member,
        Sprite::from_image(assets.sky.clone()),
        Transform::from_translation(frame.to_world(BACKGROUND_CENTER).extend(Z_BACKGROUND)),
    ));

    let image = cfg.platforms.image_size.half_extents() * 2.0;
    for (i, p) in cfg.platforms.layout.iter().enumerate() {
        let size = image * p.scale;
        commands.spawn((
            Name::new(format!("Platform{i}")),
            Platform,
            member,
            Sprite {
                image: assets.ground.clone(),
                custom_size: Some(size),
                ..default()
            },
            platform_body(size * 0.5),
            Transform::from_translation(frame.to_world(p.position.as_vec2()).extend(Z_PLATFORM)),
        ));
    }
    spawn_world_bounds(&mut commands, &frame, session);

    let player_half = cfg.player.size.half_extents();
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            member,
            GroundContacts::default(),
            HalfExtents(player_half),
            SpriteAnimator::new(ClipName::Turn, &library),
            Sprite::from_atlas_image(
                assets.dude.clone(),
                TextureAtlas {
                    layout: assets.dude_layout.clone(),
                    index: library.get(ClipName::Turn).first_frame(),
                },
            ),
            player_body(player_half, cfg.player.bounce),
            Transform::from_translation(
                frame.to_world(cfg.player.spawn.as_vec2()).extend(Z_ACTOR),
            ),
        ))
        .id();
    commands
        .entity(player)
        .with_child((FootSensor { owner: player }, foot_sensor(player_half)));

    let stars = spawn_stars(&mut commands, &cfg, &frame, &assets, &mut rng, session);
    commands.insert_resource(stars);
    commands.insert_resource(BombPool::with_capacity(cfg.bombs.capacity));

    let label = &cfg.score_text;
    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        member,
        Text2d::new(format!("{}{}", label.prefix, state.score())),
        TextFont {
            font_size: label.font_size,
            ..default()
        },
        TextColor(parse_hex_color(&label.color, Color::BLACK)),
        Anchor::TopLeft,
        Transform::from_translation(frame.to_world(label.position.as_vec2()).extend(Z_LABEL)),
    ));

    activate_physics(&mut rapier, &cfg);
    state.begin_play();
    info!(target: "scene", "Session {} playing", session.0);
}

/// Loads images through the `AssetServer`; left out of headless apps that
/// insert `SceneAssets` themselves.
pub struct SceneLoadingPlugin;

impl Plugin for SceneLoadingPlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        app.add_systems(
            Update,
            load_scene_assets
                .in_set(LifecycleSet)
                .after(begin_session)
                .before(build_scene)
                .run_if(scene_in(ScenePhase::Loading)),
        );
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        let cfg = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();
        app.insert_resource(SceneRng::from_seed(cfg.rng_seed))
            .insert_resource(AnimationLibrary::from_config(&cfg.animation))
            .init_resource::<GameConfig>()
            .insert_resource(SceneFrame::from_config(&cfg))
            .add_event::<SessionStarted>()
            .add_event::<CollisionEvent>()
            .add_systems(
                Update,
                (
                    begin_session,
                    build_scene
                        .run_if(scene_in(ScenePhase::Ready))
                        .run_if(resource_exists::<SceneAssets>),
                )
                    .chain()
                    .in_set(LifecycleSet),
            );
    }
}
