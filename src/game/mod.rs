pub mod arena;
pub mod arrangement;
pub mod config;
pub mod constants;
pub mod math;
pub mod snake;
pub mod sprite;
pub mod state;
pub mod types;
