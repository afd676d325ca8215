pub mod config;

pub use config::{
    parse_hex_color, AnimationConfig, AssetsConfig, BombsConfig, ButtonStyleConfig, ClipConfig,
    ControlsConfig, GameConfig, OverlayConfig, PhysicsConfig, PlatformConfig, PlatformsConfig,
    PlayerConfig, ScenePoint, ScoreTextConfig, SizeConfig, SpawnRange, StarsConfig, WindowConfig,
    DEFAULT_CONFIG_PATHS,
};
