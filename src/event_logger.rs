//! Game event logging for replay and post-game analysis

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info};

use crate::config::{ENABLE_EVENT_LOGGING, EVENT_LOG_FILE};
use crate::game::collision::CollisionKind;
use crate::game::direction::Direction;
use crate::game::location::Location;

/// Types of game events that can be logged
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Browser connected
    SessionStart { session_id: String },
    /// Browser disconnected
    SessionEnd { session_id: String },
    /// A round began
    RoundStart { session_id: String, round: u64 },
    /// Player changed direction
    DirectionChange {
        session_id: String,
        direction: Direction,
    },
    /// Snake ate food
    FoodEaten {
        session_id: String,
        location: Location,
    },
    /// Spawn marker placed
    MarkerPlaced {
        session_id: String,
        location: Location,
    },
    /// Enemies killed by the body; `total` is the running count
    EnemyKilled { session_id: String, total: u32 },
    /// Round ended
    GameOver {
        session_id: String,
        cause: CollisionKind,
        points: u32,
        enemies_killed: u32,
    },
}

/// Logged event with timestamp
#[derive(Debug, Serialize)]
struct LogEntry {
    /// Unix timestamp in milliseconds
    timestamp_ms: u128,
    /// The event data
    #[serde(flatten)]
    event: GameEvent,
}

/// Game event logger
pub struct EventLogger {
    /// File writer (None if logging disabled)
    writer: Option<Mutex<BufWriter<File>>>,
}

impl EventLogger {
    /// Create a new event logger
    pub fn new() -> Self {
        if !ENABLE_EVENT_LOGGING {
            info!("Event logging is disabled");
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(EVENT_LOG_FILE)
        {
            Ok(file) => {
                info!("Event logging enabled, writing to {}", EVENT_LOG_FILE);
                Self {
                    writer: Some(Mutex::new(BufWriter::new(file))),
                }
            }
            Err(e) => {
                error!("Failed to open event log file: {}", e);
                Self::disabled()
            }
        }
    }

    /// A logger that drops everything
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    /// Log a game event
    pub fn log(&self, event: GameEvent) {
        let Some(ref writer) = self.writer else {
            return;
        };

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let entry = LogEntry { timestamp_ms, event };

        if let Ok(mut w) = writer.lock() {
            if let Ok(json) = serde_json::to_string(&entry) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }
    }

    pub fn log_session_start(&self, session_id: &str) {
        self.log(GameEvent::SessionStart {
            session_id: session_id.to_string(),
        });
    }

    pub fn log_session_end(&self, session_id: &str) {
        self.log(GameEvent::SessionEnd {
            session_id: session_id.to_string(),
        });
    }

    pub fn log_round_start(&self, session_id: &str, round: u64) {
        self.log(GameEvent::RoundStart {
            session_id: session_id.to_string(),
            round,
        });
    }

    /// Log direction change
    pub fn log_direction(&self, session_id: &str, direction: Direction) {
        self.log(GameEvent::DirectionChange {
            session_id: session_id.to_string(),
            direction,
        });
    }

    /// Log food eaten
    pub fn log_food_eaten(&self, session_id: &str, location: Location) {
        self.log(GameEvent::FoodEaten {
            session_id: session_id.to_string(),
            location,
        });
    }

    pub fn log_marker(&self, session_id: &str, location: Location) {
        self.log(GameEvent::MarkerPlaced {
            session_id: session_id.to_string(),
            location,
        });
    }

    pub fn log_enemy_killed(&self, session_id: &str, total: u32) {
        self.log(GameEvent::EnemyKilled {
            session_id: session_id.to_string(),
            total,
        });
    }

    /// Log the end of a round
    pub fn log_game_over(&self, session_id: &str, cause: CollisionKind, points: u32, enemies_killed: u32) {
        self.log(GameEvent::GameOver {
            session_id: session_id.to_string(),
            cause,
            points,
            enemies_killed,
        });
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}
