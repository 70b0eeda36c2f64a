//! Game configuration constants

use serde::{Deserialize, Serialize};

/// Default playfield width in pixels
pub const DEFAULT_BOARD_WIDTH: i32 = 800;

/// Default playfield height in pixels
pub const DEFAULT_BOARD_HEIGHT: i32 = 600;

/// Largest accepted board side in pixels
pub const MAX_BOARD_DIMENSION: i32 = 8192;

/// Grid size (snake segment size) in pixels
pub const CELL_SIZE: i32 = 20;

/// Simulation tick delay in milliseconds
pub const TICK_DELAY_MS: u64 = 100;

/// Interval between enemy spawns in milliseconds
pub const SPAWN_INTERVAL_MS: u64 = 3000;

/// Delay between a spawn marker appearing and its enemy materializing
pub const SPAWN_DELAY_MS: u64 = 2000;

/// Enemies move `CELL_SIZE / ENEMY_SPEED_DIVISOR` pixels per tick
pub const ENEMY_SPEED_DIVISOR: f64 = 4.0;

/// Random draws attempted when placing food off the snake
pub const FOOD_PLACEMENT_ATTEMPTS: usize = 32;

/// WebSocket server port
pub const SERVER_PORT: u16 = 8080;

/// Messages queued for a client before its session waits
pub const OUTBOX_CAPACITY: usize = 100;

// =============================================================================
// Leaderboard
// =============================================================================

/// Number of records kept on the leaderboard
pub const LEADERBOARD_CAPACITY: usize = 5;

/// Directory holding persisted key-value entries
pub const SCORE_STORE_DIR: &str = "data";

/// Key the leaderboard is stored under
pub const SCORES_KEY: &str = "scores";

// =============================================================================
// Event Logging
// =============================================================================

/// Enable game event logging
pub const ENABLE_EVENT_LOGGING: bool = true;

/// Log file path
pub const EVENT_LOG_FILE: &str = "game_events.log";

/// Game-facing settings for a single session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Initial board width in pixels
    pub width: i32,
    /// Initial board height in pixels
    pub height: i32,
    /// Grid quantum for movement and collision proximity
    pub cell_size: i32,
    /// Simulation clock period
    pub tick_ms: u64,
    /// Spawn clock period
    pub spawn_interval_ms: u64,
    /// Marker to enemy delay
    pub spawn_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            cell_size: CELL_SIZE,
            tick_ms: TICK_DELAY_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_delay_ms: SPAWN_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Configuration with a custom board size
    pub fn with_board(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Distance an enemy covers per tick
    pub fn enemy_step(&self) -> f64 {
        f64::from(self.cell_size) / ENEMY_SPEED_DIVISOR
    }
}
