use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

/// Default layered config locations (later entries override earlier keys).
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["assets/config/game.ron", "assets/config/game.local.ron"];

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
    /// CSS selector of the host canvas (web builds only).
    pub canvas: Option<String>,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 1200.0,
            title: "Star Catcher".into(),
            auto_close: 0.0,
            canvas: Some("#game-container".into()),
        }
    }
}

/// A point in scene space: origin top-left, y grows downward.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct ScenePoint {
    pub x: f32,
    pub y: f32,
}
impl ScenePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct SizeConfig {
    pub width: f32,
    pub height: f32,
}
impl SizeConfig {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
    pub fn half_extents(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward gravity in scene pixels / s^2.
    pub gravity: f32,
    pub pixels_per_meter: f32,
    pub debug_render: bool,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 300.0,
            pixels_per_meter: 50.0,
            debug_render: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: ScenePoint,
    pub size: SizeConfig,
    pub run_speed: f32,
    pub jump_speed: f32,
    pub bounce: f32,
    pub hit_tint: String,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: ScenePoint::new(100.0, 450.0),
            size: SizeConfig::new(32.0, 48.0),
            run_speed: 160.0,
            jump_speed: 330.0,
            bounce: 0.2,
            hit_tint: "#ff0000".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StarsConfig {
    pub count: usize,
    pub start: ScenePoint,
    pub step_x: f32,
    pub size: SizeConfig,
    pub bounce: SpawnRange<f32>,
    pub score_per_star: u32,
}
impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: 12,
            start: ScenePoint::new(12.0, 0.0),
            step_x: 70.0,
            size: SizeConfig::new(24.0, 22.0),
            bounce: SpawnRange { min: 0.4, max: 0.8 },
            score_per_star: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BombsConfig {
    pub capacity: usize,
    pub spawn_y: f32,
    pub radius: f32,
    pub bounce: f32,
    /// Inclusive integer range, like the horizontal spawn velocity it drives.
    pub velocity_x: SpawnRange<i32>,
    /// Downward speed at spawn.
    pub velocity_y: f32,
}
impl Default for BombsConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            spawn_y: 16.0,
            radius: 7.0,
            bounce: 1.0,
            velocity_x: SpawnRange { min: -200, max: 200 },
            velocity_y: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PlatformConfig {
    pub position: ScenePoint,
    pub scale: f32,
}
impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            position: ScenePoint::default(),
            scale: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlatformsConfig {
    pub image_size: SizeConfig,
    pub layout: Vec<PlatformConfig>,
}
impl Default for PlatformsConfig {
    fn default() -> Self {
        Self {
            image_size: SizeConfig::new(400.0, 32.0),
            layout: vec![
                PlatformConfig { position: ScenePoint::new(400.0, 568.0), scale: 2.0 },
                PlatformConfig { position: ScenePoint::new(600.0, 400.0), scale: 1.0 },
                PlatformConfig { position: ScenePoint::new(50.0, 250.0), scale: 1.0 },
                PlatformConfig { position: ScenePoint::new(750.0, 220.0), scale: 1.0 },
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ClipConfig {
    pub first: usize,
    pub last: usize,
    pub fps: f32,
    pub looping: bool,
}
impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            first: 0,
            last: 0,
            fps: 10.0,
            looping: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub frame_size: SizeConfig,
    pub columns: u32,
    pub rows: u32,
    pub left: ClipConfig,
    pub turn: ClipConfig,
    pub right: ClipConfig,
}
impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_size: SizeConfig::new(32.0, 48.0),
            columns: 9,
            rows: 1,
            left: ClipConfig { first: 0, last: 3, fps: 10.0, looping: true },
            turn: ClipConfig { first: 4, last: 4, fps: 20.0, looping: false },
            right: ClipConfig { first: 5, last: 8, fps: 10.0, looping: true },
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    pub sky: String,
    pub ground: String,
    pub star: String,
    pub bomb: String,
    pub dude: String,
}
impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            sky: "images/sky.png".into(),
            ground: "images/platform.png".into(),
            star: "images/star.png".into(),
            bomb: "images/bomb.png".into(),
            dude: "images/dude.png".into(),
        }
    }
}

/// Binding tokens use the `Key:<KeyCode>` form (e.g. `Key:ArrowLeft`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub up: Vec<String>,
}
impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            left: vec!["Key:ArrowLeft".into()],
            right: vec!["Key:ArrowRight".into()],
            up: vec!["Key:ArrowUp".into()],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ButtonStyleConfig {
    pub text: String,
    pub text_color: String,
    pub background_color: String,
    /// Centre of the button, as percentages of the container.
    pub center_left_percent: f32,
    pub center_top_percent: f32,
    pub width_percent: f32,
    pub height_px: f32,
    pub border_radius_px: f32,
    pub font_size: f32,
}
impl Default for ButtonStyleConfig {
    fn default() -> Self {
        Self {
            text: "Start Game".into(),
            text_color: "#FFFFFF".into(),
            background_color: "#A953FF".into(),
            center_left_percent: 50.0,
            center_top_percent: 75.0,
            width_percent: 70.0,
            height_px: 48.0,
            border_radius_px: 8.0,
            font_size: 24.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub button: ButtonStyleConfig,
    pub restore_delay_secs: f32,
}
impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            button: ButtonStyleConfig::default(),
            restore_delay_secs: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoreTextConfig {
    pub position: ScenePoint,
    pub font_size: f32,
    pub color: String,
    pub prefix: String,
}
impl Default for ScoreTextConfig {
    fn default() -> Self {
        Self {
            position: ScenePoint::new(16.0, 16.0),
            font_size: 32.0,
            color: "#000000".into(),
            prefix: "Score: ".into(),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub stars: StarsConfig,
    pub bombs: BombsConfig,
    pub platforms: PlatformsConfig,
    pub animation: AnimationConfig,
    pub assets: AssetsConfig,
    pub controls: ControlsConfig,
    pub overlay: OverlayConfig,
    pub score_text: ScoreTextConfig,
    pub rng_seed: Option<u64>,
}

/// Parse a `#rgb` / `#rrggbb` / `#rrggbbaa` string, falling back on failure.
pub fn parse_hex_color(hex: &str, fallback: Color) -> Color {
    Srgba::hex(hex).map(Color::from).unwrap_or(fallback)
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_ron_str(&data)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, String> {
        ron::from_str(data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Default scene config compiled into the binary (used on wasm where there is no filesystem).
    pub fn embedded() -> (Self, Option<String>) {
        match Self::from_ron_str(include_str!("../../../assets/config/game.ron")) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(format!("embedded config: {e}"))),
        }
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        if let Some(val) = merged {
            match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            }
        } else {
            (GameConfig::default(), used, errors)
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        for (label, v) in [
            ("window.width", self.window.width),
            ("window.height", self.window.height),
            ("window.autoClose", self.window.auto_close),
            ("physics.gravity", self.physics.gravity),
            ("physics.pixels_per_meter", self.physics.pixels_per_meter),
            ("player.run_speed", self.player.run_speed),
            ("player.jump_speed", self.player.jump_speed),
            ("player.bounce", self.player.bounce),
            ("stars.step_x", self.stars.step_x),
            ("bombs.spawn_y", self.bombs.spawn_y),
            ("bombs.radius", self.bombs.radius),
            ("bombs.bounce", self.bombs.bounce),
            ("bombs.velocity_y", self.bombs.velocity_y),
            ("overlay.restore_delay_secs", self.overlay.restore_delay_secs),
        ] {
            if !v.is_finite() {
                w.push(format!("{label} {v} is not finite; using default"));
            }
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.physics.gravity <= 0.0 {
            w.push(format!(
                "physics.gravity {} is not downward; stars and player will float",
                self.physics.gravity
            ));
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if self.player.run_speed <= 0.0 {
            w.push("player.run_speed must be > 0".into());
        }
        if self.player.jump_speed <= 0.0 {
            w.push("player.jump_speed must be > 0".into());
        }
        if self.stars.count == 0 {
            w.push("stars.count is 0; the first wave is already depleted".into());
        }
        if self.stars.bounce.min > self.stars.bounce.max {
            w.push(format!(
                "stars.bounce min ({}) greater than max ({})",
                self.stars.bounce.min, self.stars.bounce.max
            ));
        }
        let last_column = self.stars.start.x + self.stars.step_x * self.stars.count.saturating_sub(1) as f32;
        if last_column > self.window.width {
            w.push(format!(
                "last star column x={last_column} lies outside the {}-wide field",
                self.window.width
            ));
        }
        if self.bombs.capacity == 0 {
            w.push("bombs.capacity is 0; no hazard will ever spawn".into());
        }
        if self.bombs.velocity_x.min > self.bombs.velocity_x.max {
            w.push(format!(
                "bombs.velocity_x min ({}) greater than max ({})",
                self.bombs.velocity_x.min, self.bombs.velocity_x.max
            ));
        }
        if self.bombs.radius <= 0.0 {
            w.push("bombs.radius must be > 0".into());
        }
        if self.animation.columns == 0 || self.animation.rows == 0 {
            w.push("animation grid must have at least one column and row".into());
        }
        let frames = (self.animation.columns * self.animation.rows) as usize;
        for (label, clip) in [
            ("left", &self.animation.left),
            ("turn", &self.animation.turn),
            ("right", &self.animation.right),
        ] {
            if clip.first > clip.last {
                w.push(format!("animation.{label} first > last"));
            }
            if clip.last >= frames {
                w.push(format!(
                    "animation.{label} last frame {} outside sheet of {frames} frames",
                    clip.last
                ));
            }
            if clip.fps <= 0.0 {
                w.push(format!("animation.{label} fps must be > 0"));
            }
        }
        if self.overlay.restore_delay_secs <= 0.0 {
            w.push("overlay.restore_delay_secs <= 0; start button returns instantly".into());
        }
        for (label, hex) in [
            ("player.hit_tint", &self.player.hit_tint),
            ("overlay.button.text_color", &self.overlay.button.text_color),
            ("overlay.button.background_color", &self.overlay.button.background_color),
            ("score_text.color", &self.score_text.color),
        ] {
            if Srgba::hex(hex).is_err() {
                w.push(format!("{label} '{hex}' is not a valid hex colour; using default"));
            }
        }
        w
    }
}
