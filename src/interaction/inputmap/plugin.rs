use bevy::prelude::*;

use super::parse::parse_controls;
use super::systems::system_sample_directions;
use super::types::{DirectionalBindings, DirectionalInput};
use crate::core::config::GameConfig;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DirectionalInputSet;

pub struct DirectionalInputPlugin;

impl Plugin for DirectionalInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DirectionalInput>()
            .insert_resource(DirectionalBindings::arrows())
            .configure_sets(PreUpdate, DirectionalInputSet)
            .add_systems(PreStartup, load_bindings)
            .add_systems(PreUpdate, system_sample_directions.in_set(DirectionalInputSet));
    }
}

fn load_bindings(mut commands: Commands, cfg: Option<Res<GameConfig>>) {
    let Some(cfg) = cfg else {
        warn!(target: "input", "GameConfig missing; keeping arrow-key bindings");
        return;
    };
    let parsed = parse_controls(&cfg.controls);
    for e in &parsed.errors {
        error!(target: "input", "INPUT BINDING ERROR: {e}");
    }
    info!(
        target: "input",
        "Directional bindings: left={:?} right={:?} up={:?}",
        parsed.bindings.left, parsed.bindings.right, parsed.bindings.up
    );
    commands.insert_resource(parsed.bindings);
}
