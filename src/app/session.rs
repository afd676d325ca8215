//! Ownership of the single live game session.
//!
//! `OverlayControl` holds the start-button visibility flag and an
//! `Option<GameSession>`. Replacing or disposing the session drops it, which
//! also drops its pending restore timer; the entities it spawned are reaped by
//! [`reap_retired_sessions`] because their `SessionMember` id is no longer
//! current.
use bevy::prelude::*;
use std::time::Duration;

use crate::core::components::{SessionId, SessionMember};

/// One-shot delay after a hit before the start button comes back.
#[derive(Debug, Clone)]
pub struct RestoreTimer(Timer);

impl RestoreTimer {
    pub fn new(delay: Duration) -> Self {
        Self(Timer::new(delay, TimerMode::Once))
    }

    /// Advance; returns `true` on the tick the delay elapses.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.0.tick(delta).just_finished()
    }
}

/// Handle to the running scene instance.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    restore: Option<RestoreTimer>,
}

impl GameSession {
    fn new(id: SessionId) -> Self {
        Self { id, restore: None }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn restore_pending(&self) -> bool {
        self.restore.is_some()
    }
}

#[derive(Resource, Debug)]
pub struct OverlayControl {
    visible: bool,
    session: Option<GameSession>,
    next_id: u32,
    restore_delay: Duration,
}

impl Default for OverlayControl {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl OverlayControl {
    pub fn new(restore_delay: Duration) -> Self {
        Self {
            visible: true,
            session: None,
            next_id: 1,
            restore_delay,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn current_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(GameSession::id)
    }

    pub fn is_current(&self, id: SessionId) -> bool {
        self.current_id() == Some(id)
    }

    /// Hide the button and replace the session. The retired session (if any)
    /// is handed back so the caller can log it; its timer is already inert.
    #[must_use = "the retired session should be logged or dropped explicitly"]
    pub fn start(&mut self) -> (SessionId, Option<GameSession>) {
        self.visible = false;
        let id = SessionId(self.next_id);
        self.next_id += 1;
        let retired = self.session.replace(GameSession::new(id));
        (id, retired)
    }

    /// Arm the restore delay for `id`. Ignored for sessions that are no longer current
    /// or that already have a delay pending.
    pub fn schedule_restore(&mut self, id: SessionId) -> bool {
        let delay = self.restore_delay;
        match self.session.as_mut() {
            Some(s) if s.id == id && s.restore.is_none() => {
                s.restore = Some(RestoreTimer::new(delay));
                true
            }
            _ => false,
        }
    }

    /// Advance the pending delay; shows the button when it elapses.
    pub fn tick_restore(&mut self, delta: Duration) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(timer) = session.restore.as_mut() else {
            return false;
        };
        if timer.tick(delta) {
            session.restore = None;
            self.visible = true;
            return true;
        }
        false
    }

    /// Tear down on overlay disposal: the session (and its timer) is dropped.
    pub fn dispose(&mut self) -> Option<GameSession> {
        self.session.take()
    }
}

/// Despawn every session member whose session is not the current one.
pub fn reap_retired_sessions(
    mut commands: Commands,
    overlay: Res<OverlayControl>,
    members: Query<(Entity, &SessionMember)>,
) {
    let current = overlay.current_id();
    let mut reaped = 0usize;
    for (entity, member) in &members {
        if Some(member.0) != current {
            commands.entity(entity).despawn();
            reaped += 1;
        }
    }
    if reaped > 0 {
        info!(target: "session", "Reaped {reaped} entities from retired sessions");
    }
}
