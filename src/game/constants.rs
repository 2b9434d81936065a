pub const INVINCIBILITY_BLINK_RATE: f64 = 0.1;
pub const MAX_HITPOINTS: i32 = 100;
pub const INIT_SPEED: f64 = 10.0;
pub const MIN_SPEED: f64 = 5.0;
pub const MAX_SPEED: f64 = 30.0;
pub const SPAWN_INVINCIBILITY_SECS: f64 = 5.0;
pub const RESPAWN_INVINCIBILITY_SECS: f64 = 3.5;

pub const MIN_BODY_LENGTH: usize = 2;
pub const SPRITE_CELL_SIZE: i32 = 10;

pub const DEFAULT_ARENA_WIDTH: i32 = 40;
pub const DEFAULT_ARENA_HEIGHT: i32 = 30;
