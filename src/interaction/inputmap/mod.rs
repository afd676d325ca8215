pub mod parse;
pub mod plugin;
pub mod systems;
pub mod types;

pub use plugin::{DirectionalInputPlugin, DirectionalInputSet};
pub use types::{Direction, DirectionalBindings, DirectionalInput};
