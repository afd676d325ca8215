//! Mapping between scene space (top-left origin, y down, `width`x`height`)
//! and Bevy world space (centred origin, y up).
use bevy::prelude::*;

use crate::core::config::GameConfig;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    pub width: f32,
    pub height: f32,
}

impl Default for SceneFrame {
    fn default() -> Self {
        Self { width: 800.0, height: 1200.0 }
    }
}

impl SceneFrame {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_config(cfg: &GameConfig) -> Self {
        Self::new(cfg.window.width, cfg.window.height)
    }

    pub fn to_world(&self, scene: Vec2) -> Vec2 {
        Vec2::new(scene.x - self.width * 0.5, self.height * 0.5 - scene.y)
    }

    pub fn to_scene(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.width * 0.5, self.height * 0.5 - world.y)
    }

    /// Scene-space velocity (y down) to world-space velocity (y up).
    pub fn velocity_to_world(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x, -v.y)
    }

    pub fn mid_x(&self) -> f32 {
        self.width * 0.5
    }
}
