//! Core game constants
//!
//! Grid dimensions, stat increments and leveling thresholds.

/// Default world dimensions (columns A-E, rows 1-5)
pub const DEFAULT_WIDTH: u8 = 5;
pub const DEFAULT_HEIGHT: u8 = 5;

/// Column letters limit the grid width
pub const MAX_WIDTH: u8 = 26;
pub const MAX_HEIGHT: u8 = 99;

/// Stat points a fresh character can spend
pub const STARTING_POINTS: u32 = 5;

/// Per-point stat increments
pub const HEALTH_INCREMENT: i32 = 10;
pub const ATTACK_INCREMENT: i32 = 5;
pub const DEFENSE_INCREMENT: i32 = 5;
pub const MAGIC_INCREMENT: i32 = 5;

/// Encounter roll range (1..=ENCOUNTER_ROLL_MAX)
pub const ENCOUNTER_ROLL_MAX: u32 = 100;

/// Default chance (percent) that running from a battle works
pub const DEFAULT_FLEE_CHANCE: u32 = 50;

/// Experience needed per level step: EXP_PER_LEVEL * (level + 1)
pub const EXP_PER_LEVEL: u32 = 100;

/// Stat points granted on each level gain
pub const POINTS_PER_LEVEL: u32 = 1;
