//! Per-session scene state: lifecycle phase, score and the game-over flag.
//!
//! A fresh `SceneState` is inserted for every session, which is the only way
//! the game-over flag ever returns to `false`.
use bevy::prelude::*;

use crate::core::components::SessionId;

/// Scene lifecycle. `Loading -> Ready -> Playing -> Over`, no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenePhase {
    /// Asset handles requested, waiting for them to settle.
    #[default]
    Loading,
    /// Assets settled; the object graph is built on the next pass.
    Ready,
    /// Per-frame rules active.
    Playing,
    /// A hazard was touched; physics paused, rules idle.
    Over,
}

#[derive(Resource, Debug, Clone)]
pub struct SceneState {
    session: SessionId,
    phase: ScenePhase,
    score: u32,
    game_over: bool,
}

impl SceneState {
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            phase: ScenePhase::Loading,
            score: 0,
            game_over: false,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn mark_ready(&mut self) -> bool {
        self.advance(ScenePhase::Loading, ScenePhase::Ready)
    }

    pub fn begin_play(&mut self) -> bool {
        self.advance(ScenePhase::Ready, ScenePhase::Playing)
    }

    pub fn add_score(&mut self, amount: u32) -> u32 {
        self.score = self.score.saturating_add(amount);
        self.score
    }

    /// Latch game over. Returns `true` only the first time.
    pub fn end(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        self.phase = ScenePhase::Over;
        true
    }

    fn advance(&mut self, from: ScenePhase, to: ScenePhase) -> bool {
        if self.phase != from {
            return false;
        }
        self.phase = to;
        true
    }
}

/// Request to (re)start the game; written by the start button.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StartGame;

/// Written by the overlay after it has replaced the session handle.
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionStarted {
    pub session: SessionId,
}

/// Written once per session when the player touches a hazard.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameOver {
    pub session: SessionId,
    pub score: u32,
}

/// Written for every collected star.
#[derive(Event, Debug, Clone, Copy)]
pub struct StarCollected {
    pub slot: usize,
    pub score: u32,
}

/// Run condition: the current session is in `phase`.
pub fn scene_in(phase: ScenePhase) -> impl Fn(Option<Res<SceneState>>) -> bool + Clone {
    move |state: Option<Res<SceneState>>| state.is_some_and(|s| s.phase == phase)
}

/// Run condition: a session exists in any phase.
pub fn scene_exists(state: Option<Res<SceneState>>) -> bool {
    state.is_some()
}
