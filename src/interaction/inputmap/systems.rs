//! Per-frame directional input sampling.
use bevy::prelude::*;

use super::types::{Direction, DirectionalBindings, DirectionalInput};

pub fn system_sample_directions(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<DirectionalBindings>,
    mut input: ResMut<DirectionalInput>,
) {
    let Some(keyboard) = keyboard else {
        *input = DirectionalInput::default();
        return;
    };
    let held = |dir| bindings.keys(dir).iter().any(|k| keyboard.pressed(*k));
    *input = DirectionalInput {
        left: held(Direction::Left),
        right: held(Direction::Right),
        up: held(Direction::Up),
    };
}
