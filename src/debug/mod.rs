//! Debug module: periodic session stats and a physics wireframe toggle.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use stats::{DebugState, DebugStats};

#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use crate::core::system::PresentationSet;
        use stats::{debug_logging_system, debug_stats_collect_system, toggle_wireframe_system};

        app.init_resource::<DebugState>()
            .init_resource::<DebugStats>()
            .add_systems(
                Update,
                (
                    toggle_wireframe_system,
                    debug_stats_collect_system,
                    debug_logging_system,
                )
                    .chain()
                    .after(PresentationSet),
            );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;

#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
