use bevy::prelude::*;
use bevy_rapier2d::render::DebugRenderContext;

use crate::app::session::OverlayControl;
use crate::core::components::Bomb;
use crate::gameplay::stars::StarPool;
use crate::gameplay::state::{ScenePhase, SceneState};

#[derive(Resource)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 2.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[derive(Resource, Default, Debug, Clone)]
pub struct DebugStats {
    pub fps: f32,
    pub session: Option<u32>,
    pub phase: Option<ScenePhase>,
    pub score: u32,
    pub stars_active: usize,
    pub bombs: usize,
    pub overlay_visible: bool,
}

/// F1 flips the Rapier wireframe when the debug renderer is installed.
pub fn toggle_wireframe_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    ctx: Option<ResMut<DebugRenderContext>>,
) {
    let (Some(keys), Some(mut ctx)) = (keys, ctx) else {
        return;
    };
    if keys.just_pressed(KeyCode::F1) {
        ctx.enabled = !ctx.enabled;
        info!(target: "debug", "Physics wireframe {}", if ctx.enabled { "on" } else { "off" });
    }
}

pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    overlay: Option<Res<OverlayControl>>,
    scene: Option<Res<SceneState>>,
    stars: Option<Res<StarPool>>,
    q_bombs: Query<(), With<Bomb>>,
) {
    state.frame_counter += 1;
    let inst_fps = 1.0 / time.delta_secs().max(1e-6);
    stats.fps = if stats.fps == 0.0 {
        inst_fps
    } else {
        stats.fps * 0.9 + inst_fps * 0.1
    };
    stats.session = scene.as_ref().map(|s| s.session().0);
    stats.phase = scene.as_ref().map(|s| s.phase());
    stats.score = scene.as_ref().map_or(0, |s| s.score());
    stats.stars_active = stars.map_or(0, |p| p.count_active());
    stats.bombs = q_bombs.iter().count();
    stats.overlay_visible = overlay.is_some_and(|o| o.visible());
}

pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, stats: Res<DebugStats>) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(target: "debug", "SCENE frame={} t={:.3}s fps={:.1} session={:?} phase={:?} score={} stars={} bombs={} overlay={}",
            state.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.session,
            stats.phase,
            stats.score,
            stats.stars_active,
            stats.bombs,
            stats.overlay_visible);
    }
}
