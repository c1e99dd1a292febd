pub mod core;
pub mod game;
