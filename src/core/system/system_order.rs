//! Central system ordering labels to make the per-frame sequence explicit.
//! Stages (high-level):
//! 0. Session / Lifecycle (start button, reaping, loading, scene build)
//! 1. Input (directional input -> player velocity / clip)
//! 2. Rules (ground contacts, collect + hit handlers; Rapier steps later in PostUpdate)
//! 3. Presentation (sprite animation, score label, overlay button)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct RulesSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PresentationSet;

/// Session replacement (start button, reaping retired sessions).
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SessionSet;

/// Per-session scene lifecycle (reset, asset loading, graph construction).
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct LifecycleSet;

/// Order every scene set within `Update`. Idempotent, so each plugin calls it.
pub fn configure_scene_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (SessionSet, LifecycleSet, InputSet, RulesSet, PresentationSet).chain(),
    );
}
