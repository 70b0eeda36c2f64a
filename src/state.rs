//! Application state shared across all handlers

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use uuid::Uuid;

use crate::config::SCORE_STORE_DIR;
use crate::event_logger::EventLogger;
use crate::scores::{JsonFileStore, KeyValueStore, ScoreLedger};

/// Shared application state
pub struct AppState {
    /// Connected game sessions and when they joined
    pub sessions: DashMap<Uuid, Instant>,
    /// Leaderboard shared by every session
    pub ledger: Arc<ScoreLedger>,
    /// Event logger for replay/analysis
    pub event_logger: Arc<EventLogger>,
}

impl AppState {
    /// Create a new application state persisting scores to disk
    pub fn new() -> Self {
        Self::with_store(Arc::new(JsonFileStore::new(SCORE_STORE_DIR)), Arc::new(EventLogger::new()))
    }

    /// Create with a custom store and logger (for testing)
    pub fn with_store(store: Arc<dyn KeyValueStore>, event_logger: Arc<EventLogger>) -> Self {
        Self {
            sessions: DashMap::new(),
            ledger: Arc::new(ScoreLedger::new(store)),
            event_logger,
        }
    }

    /// Get the number of connected players
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
