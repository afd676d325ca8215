pub mod game;
pub mod overlay;
pub mod session;
