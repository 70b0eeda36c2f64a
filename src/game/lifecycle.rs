//! Game lifecycle controller: owns the state and drives round transitions

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use super::collision::CollisionKind;
use super::direction::Direction;
use super::engine;
use super::location::Board;
use super::notification::Notification;
use super::state::GameState;
use crate::config::{GameConfig, MAX_BOARD_DIMENSION};
use crate::error::GameError;
use crate::scores::{ScoreLedger, ScoreRecord};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

/// One player's game.
///
/// Clock handlers (`tick`, `spawn`, `materialize`) are no-ops outside
/// `Running`, which is how stopped clocks are modelled.
pub struct Game {
    config: GameConfig,
    state: GameState,
    phase: Phase,
    rng: StdRng,
    ledger: Arc<ScoreLedger>,
}

impl Game {
    pub fn new(config: GameConfig, ledger: Arc<ScoreLedger>) -> Self {
        Self::with_rng(config, ledger, StdRng::from_entropy())
    }

    pub fn with_rng(config: GameConfig, ledger: Arc<ScoreLedger>, mut rng: StdRng) -> Self {
        let state = GameState::new(&config, &mut rng);
        Self {
            config,
            state,
            phase: Phase::Idle,
            rng,
            ledger,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Idle -> Running
    pub fn start(&mut self) -> Vec<Notification> {
        if self.phase != Phase::Idle {
            warn!("start ignored in phase {:?}", self.phase);
            return Vec::new();
        }
        self.enter_running()
    }

    /// GameOver -> Running. Entities were already reset on game over.
    pub fn restart(&mut self) -> Vec<Notification> {
        if self.phase != Phase::GameOver {
            debug!("restart ignored in phase {:?}", self.phase);
            return Vec::new();
        }
        self.enter_running()
    }

    fn enter_running(&mut self) -> Vec<Notification> {
        self.phase = Phase::Running;
        info!("Round {} started", self.state.round);
        vec![
            Notification::Started,
            Notification::ScoreUpdated {
                points: self.state.points,
            },
            Notification::EnemiesKilled {
                count: self.state.enemies_killed,
            },
            Notification::Render(self.state.snapshot()),
        ]
    }

    /// Latch a new direction for the next tick. Returns whether it was taken.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if !self.is_running() || !self.state.direction.accepts(requested) {
            return false;
        }
        self.state.direction = requested;
        true
    }

    /// Follow the client's viewport
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), GameError> {
        let cell_size = self.config.cell_size;
        let fits = |side: i32| (cell_size..=MAX_BOARD_DIMENSION).contains(&side);
        if !fits(width) || !fits(height) {
            return Err(GameError::InvalidBoard {
                width,
                height,
                cell_size,
            });
        }

        let was_idle = self.phase == Phase::Idle;
        self.state.board = Board::new(width, height);

        // Before the first move the snake and food follow the new center/bounds
        if was_idle || (self.state.snake.len() == 1 && !self.state.direction.is_moving()) {
            let center = self.state.board.center(cell_size);
            self.state.snake.reset(center);
            if !self.state.board.contains(&self.state.food.location) || self.state.food.is_at(&center) {
                self.state
                    .food
                    .respawn(&mut self.rng, &self.state.board, cell_size, &self.state.snake);
            }
        }
        debug!("Board resized to {}x{}", width, height);
        Ok(())
    }

    /// Simulation clock
    pub fn tick(&mut self, now_ms: u64) -> Vec<Notification> {
        let mut out = Vec::new();
        if !self.is_running() {
            return out;
        }

        // Catch markers whose deadline passed between clock events
        self.materialize_into(now_ms, &mut out);

        if let Some(cause) = engine::tick(&mut self.state, &self.config, &mut self.rng, &mut out) {
            self.game_over(cause, &mut out);
        }
        out
    }

    /// Spawn clock: put down a new marker
    pub fn spawn(&mut self, now_ms: u64) -> Vec<Notification> {
        if !self.is_running() {
            return Vec::new();
        }

        let marker = self.state.spawner.schedule(
            &mut self.rng,
            &self.state.board,
            self.config.cell_size,
            now_ms,
            self.config.spawn_delay_ms,
            self.state.round,
        );
        debug!("Spawn marker {} at {:?}", marker.id, marker.location);

        vec![
            Notification::MarkerPlaced {
                location: marker.location,
            },
            Notification::Render(self.state.snapshot()),
        ]
    }

    /// Materialization deadline reached
    pub fn materialize(&mut self, now_ms: u64) -> Vec<Notification> {
        let mut out = Vec::new();
        if !self.is_running() {
            return out;
        }
        if self.materialize_into(now_ms, &mut out) {
            out.push(Notification::Render(self.state.snapshot()));
        }
        out
    }

    /// Session time of the next pending materialization
    pub fn next_materialization_ms(&self) -> Option<u64> {
        self.state.spawner.next_deadline()
    }

    fn materialize_into(&mut self, now_ms: u64, out: &mut Vec<Notification>) -> bool {
        let enemies = self.state.spawner.materialize(now_ms, self.state.round);
        if enemies.is_empty() {
            return false;
        }
        let count = enemies.len();
        self.state.enemies.extend(enemies);
        out.push(Notification::EnemiesMaterialized { count });
        true
    }

    fn game_over(&mut self, cause: CollisionKind, out: &mut Vec<Notification>) {
        self.phase = Phase::GameOver;

        let record = ScoreRecord::new(self.state.points, self.state.enemies_killed);
        info!(
            "Game over ({}) in round {}: {} points, {} enemies killed",
            cause.as_str(),
            self.state.round,
            record.points,
            record.enemies_killed
        );

        let leaderboard = match self.ledger.record(record) {
            Ok(board) => board,
            Err(e) => {
                error!("Failed to persist score: {}", e);
                self.ledger.load()
            }
        };

        out.push(Notification::GameOver {
            cause,
            record,
            leaderboard: leaderboard.records().to_vec(),
            history: leaderboard.lines(),
        });

        self.state.reset(&mut self.rng, self.config.cell_size);

        out.push(Notification::ScoreUpdated { points: 0 });
        out.push(Notification::EnemiesKilled { count: 0 });
        out.push(Notification::Render(self.state.snapshot()));
    }
}
