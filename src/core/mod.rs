pub mod components;
pub mod config;
pub mod frame;
pub mod pool;
pub mod system;
