pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;
pub mod webgpu_guard;

// Curated re-exports
pub use crate::app::game::{primary_window, ConfigDiagnostics, GamePlugin};
pub use crate::app::overlay::OverlayPlugin;
pub use crate::app::session::OverlayControl;
pub use crate::core::config::{GameConfig, WindowConfig};
pub use crate::gameplay::GameplayPlugin;
