use bevy::prelude::*;
use smallvec::SmallVec;

/// The three directions the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
}

/// Key bindings per direction (any bound key held counts as the direction held).
#[derive(Resource, Debug, Clone, Default)]
pub struct DirectionalBindings {
    pub left: SmallVec<[KeyCode; 2]>,
    pub right: SmallVec<[KeyCode; 2]>,
    pub up: SmallVec<[KeyCode; 2]>,
}

impl DirectionalBindings {
    pub fn keys(&self, dir: Direction) -> &[KeyCode] {
        match dir {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Up => &self.up,
        }
    }

    pub fn arrows() -> Self {
        Self {
            left: SmallVec::from_slice(&[KeyCode::ArrowLeft]),
            right: SmallVec::from_slice(&[KeyCode::ArrowRight]),
            up: SmallVec::from_slice(&[KeyCode::ArrowUp]),
        }
    }
}

/// Directional input sampled once per frame, before any gameplay system reads it.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl DirectionalInput {
    pub fn held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
        }
    }
}
