pub mod inputmap;
pub mod session;
