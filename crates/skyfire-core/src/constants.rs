//! Simulation constants and tuning parameters.

/// Reference tick rate (Hz).
pub const TICK_RATE: u32 = 20;

/// Reference tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1000 / TICK_RATE as u64;

// --- Play field ---

pub const SCREEN_WIDTH: f32 = 1300.0;
pub const SCREEN_HEIGHT: f32 = 750.0;

// --- Player ---

pub const PLAYER_INITIAL_HEALTH: i32 = 5;
pub const PLAYER_START_X: f32 = 5.0;
pub const PLAYER_START_Y: f32 = 300.0;
pub const PLAYER_WIDTH: f32 = 120.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
/// Distance covered per tick while a move intent is held.
pub const PLAYER_SPEED: f32 = 8.0;

/// Vertical spread between multi-shot projectiles (per tick).
pub const MULTISHOT_SPREAD: f32 = 2.0;

// --- Projectiles ---

pub const PROJECTILE_WIDTH: f32 = 30.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;
pub const USER_PROJECTILE_SPEED: f32 = 15.0;
pub const ENEMY_PROJECTILE_SPEED: f32 = -10.0;
pub const BOSS_PROJECTILE_SPEED: f32 = -15.0;

// --- Basic enemy ---

pub const ENEMY_HEALTH: i32 = 1;
pub const ENEMY_WIDTH: f32 = 90.0;
pub const ENEMY_HEIGHT: f32 = 40.0;
pub const ENEMY_SPEED: f32 = -6.0;
pub const ENEMY_FIRE_RATE: f64 = 0.01;
/// Vertical band (top edge) in which new enemies appear.
pub const ENEMY_SPAWN_Y_MIN: f32 = 20.0;
pub const ENEMY_SPAWN_Y_MAX: f32 = SCREEN_HEIGHT - 150.0;

// --- Boss ---

pub const BOSS_HEALTH: i32 = 100;
pub const BOSS_WIDTH: f32 = 300.0;
pub const BOSS_HEIGHT: f32 = 150.0;
/// Preferred top edge at entry; the boss enters flush with the right edge.
pub const BOSS_START_Y: f32 = 300.0;
pub const BOSS_FIRE_RATE: f64 = 0.04;
/// Transparent sprite margin trimmed from every side of the boss hitbox.
pub const BOSS_HITBOX_PADDING: f32 = 30.0;
/// Magnitude of a single vertical move.
pub const BOSS_VERTICAL_VELOCITY: f32 = 8.0;
/// Copies of each of +V, -V, 0 in the movement pattern.
pub const BOSS_MOVES_PER_CYCLE: usize = 5;
/// Consecutive identical picks before the pattern is re-permuted.
pub const BOSS_MAX_FRAMES_WITH_SAME_MOVE: u32 = 10;
/// Allowed vertical band for the boss's top edge on the reference screen.
pub const BOSS_Y_UPPER_BOUND: f32 = 0.0;
pub const BOSS_Y_LOWER_BOUND: f32 = SCREEN_HEIGHT - BOSS_HEIGHT;
pub const BOSS_SHIELD_PROBABILITY: f64 = 0.02;
pub const BOSS_MAX_FRAMES_WITH_SHIELD: u32 = 60;
pub const BOSS_SHIELD_COOLDOWN_FRAMES: u32 = 100;

/// Smallest field that holds the player and the boss side by side.
pub const MIN_FIELD_WIDTH: f32 = PLAYER_START_X + PLAYER_WIDTH + BOSS_WIDTH;
pub const MIN_FIELD_HEIGHT: f32 = PLAYER_START_Y + PLAYER_HEIGHT;

// --- Power-ups ---

pub const POWER_UP_SIZE: f32 = 40.0;
pub const POWER_UP_FALL_SPEED: f32 = 3.0;

// --- Level defaults ---

pub const LEVEL_ONE_KILL_TARGET: u32 = 10;
pub const LEVEL_ONE_ENEMY_CAPACITY: usize = 5;
pub const LEVEL_ONE_SPAWN_PROBABILITY: f64 = 0.20;

pub const LEVEL_THREE_WAVES: [u32; 3] = [3, 5, 7];
pub const LEVEL_THREE_KILL_TARGET: u32 = 15;
pub const LEVEL_THREE_WAVE_SPAWN_PROBABILITY: f64 = 0.10;
pub const LEVEL_THREE_POWER_UP_PROBABILITY: f64 = 0.005;
