// Frame timing
pub const FRAME_MS: u64 = 16;
pub const MAX_TICK_MS: u64 = 100;

// Lives and obstacle population
pub const MAX_HEARTS: u8 = 5;
pub const MAX_SCRATCHERS: usize = 12;
pub const SPAWN_INTERVAL_FRAMES: u64 = 90;

// Motion
pub const SCRATCHER_SPEED: f64 = 0.15;
pub const FOLLOW_SMOOTHING: f64 = 0.2;
pub const BOUNCE_VELOCITY: f64 = -0.2;

// World geometry (y points up, origin at screen center)
pub const GAP_SIZE: f64 = 6.0;
pub const GAP_CENTER_RANGE: f64 = 4.0;
pub const SCRATCHER_WIDTH: f64 = 2.0;
pub const SCRATCHER_REACH: f64 = 15.0;
pub const SPAWN_X: f64 = 20.0;
pub const DESPAWN_X: f64 = -20.0;
pub const CEILING_Y: f64 = 8.0;

// Ground fixture collision box
pub const GROUND_Y: f64 = -9.0;
pub const GROUND_WIDTH: f64 = 100.0;
pub const GROUND_HEIGHT: f64 = 4.0;

// Cat collision box and movement bounds
pub const CAT_WIDTH: f64 = 3.0;
pub const CAT_HEIGHT: f64 = 2.0;
pub const CAT_MIN_X: f64 = -10.0;
pub const CAT_MAX_X: f64 = 10.0;
pub const CAT_MIN_Y: f64 = -7.0;
pub const CAT_MAX_Y: f64 = 8.0;
pub const CAT_START_X: f64 = -3.0;
pub const CAT_START_Y: f64 = -6.0;
pub const CAT_RESPAWN_X: f64 = -3.0;
pub const CAT_RESPAWN_Y: f64 = 2.0;

// Normalized pointer [-1, 1] to world-unit target
pub const INPUT_SCALE_X: f64 = 8.0;
pub const INPUT_SCALE_Y: f64 = 5.0;

// Timed effects, measured on the world clock
pub const INVINCIBILITY_MS: u64 = 1500;
pub const INVINCIBILITY_AFTER_HIT_MS: u64 = 500;
pub const DAMAGE_FLASH_MS: u64 = 200;
