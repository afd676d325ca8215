// This file is part of Star Catcher.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::overlay::OverlayPlugin;
use crate::core::config::{GameConfig, WindowConfig};
use crate::core::system::configure_scene_sets;
use crate::debug::DebugPlugin;
use crate::gameplay::scene::SceneLoadingPlugin;
use crate::gameplay::GameplayPlugin;
use crate::interaction::inputmap::DirectionalInputPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::camera::CameraPlugin;

/// Problems found while loading and validating config, before logging was up.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConfigDiagnostics {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

fn report_config(diag: Option<Res<ConfigDiagnostics>>, cfg: Res<GameConfig>) {
    if let Some(diag) = diag {
        for e in &diag.errors {
            warn!(target: "config", "CONFIG LOAD ISSUE: {e}");
        }
        for w in &diag.warnings {
            warn!(target: "config", "CONFIG WARNING: {w}");
        }
        if diag.used.is_empty() {
            info!(target: "config", "No config layers found; using defaults");
        } else {
            info!(target: "config", used = ?diag.used, "Config layers loaded");
        }
    }
    info!(
        target: "config",
        stars = cfg.stars.count,
        bomb_capacity = cfg.bombs.capacity,
        platforms = cfg.platforms.layout.len(),
        seed = ?cfg.rng_seed,
        "Scene summary"
    );
}

/// Fixed-size surface; the scene field never rescales with the host window.
pub fn primary_window(cfg: &WindowConfig) -> Window {
    Window {
        title: cfg.title.clone(),
        resolution: (cfg.width, cfg.height).into(),
        resizable: false,
        canvas: cfg.canvas.clone(),
        ..default()
    }
}

/// Requires `GameConfig` to be inserted first; plugins read it while building.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        let cfg = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();
        app.init_resource::<GameConfig>()
            .add_systems(Startup, report_config)
            .add_plugins((
                CameraPlugin,
                PhysicsSetupPlugin::from_config(&cfg),
                DirectionalInputPlugin,
                SceneLoadingPlugin,
                GameplayPlugin,
                OverlayPlugin,
                DebugPlugin,
                AutoClosePlugin,
            ));
    }
}
