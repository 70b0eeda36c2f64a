//! Session driver - multiplexes the clocks and player input for one game

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::event_logger::EventLogger;
use crate::outbox::Outbox;
use crate::protocol::{ClientMessage, ServerMessage};

use super::lifecycle::Game;
use super::notification::Notification;

/// Simulation and spawn clocks, re-armed each time a round starts
struct Clocks {
    simulation: Interval,
    spawn: Interval,
}

impl Clocks {
    fn arm(tick: Duration, spawn: Duration) -> Self {
        let now = Instant::now();
        let mut simulation = interval_at(now + tick, tick);
        let mut spawn_clock = interval_at(now + spawn, spawn);
        simulation.set_missed_tick_behavior(MissedTickBehavior::Delay);
        spawn_clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            simulation,
            spawn: spawn_clock,
        }
    }
}

/// One connected player's game plus its outputs
pub struct Session {
    id: Uuid,
    game: Game,
    outbox: Arc<dyn Outbox>,
    event_logger: Arc<EventLogger>,
}

impl Session {
    pub fn new(
        id: Uuid,
        game: Game,
        outbox: Arc<dyn Outbox>,
        event_logger: Arc<EventLogger>,
    ) -> Self {
        Self {
            id,
            game,
            outbox,
            event_logger,
        }
    }

    fn handle(&mut self, msg: ClientMessage) -> Vec<Notification> {
        match msg {
            ClientMessage::Direction(direction) => {
                if self.game.change_direction(direction) {
                    debug!("Session {} direction: {:?}", self.id, direction);
                    self.event_logger
                        .log_direction(&self.id.to_string(), direction);
                }
                Vec::new()
            }
            ClientMessage::Restart => self.game.restart(),
            ClientMessage::Resize { width, height } => match self.game.resize(width, height) {
                Ok(()) => vec![Notification::Render(self.game.state().snapshot())],
                Err(e) => {
                    warn!("Session {} resize rejected: {}", self.id, e);
                    Vec::new()
                }
            },
            ClientMessage::Ping => {
                debug!("Ping from session {}", self.id);
                Vec::new()
            }
        }
    }

    /// Log and deliver notifications. `false` once the client is gone.
    async fn publish(&self, notifications: Vec<Notification>) -> bool {
        for notification in notifications {
            self.record(&notification);
            if let Some(msg) = ServerMessage::from_notification(&notification) {
                if !self.outbox.send(msg).await {
                    return false;
                }
            }
        }
        true
    }

    fn record(&self, notification: &Notification) {
        let id = self.id.to_string();
        match notification {
            Notification::Started => self.event_logger.log_round_start(&id, self.game.state().round),
            Notification::FoodEaten { location } => self.event_logger.log_food_eaten(&id, *location),
            Notification::MarkerPlaced { location } => self.event_logger.log_marker(&id, *location),
            Notification::EnemiesKilled { count } if *count > 0 => {
                self.event_logger.log_enemy_killed(&id, *count)
            }
            Notification::GameOver { cause, record, .. } => {
                self.event_logger
                    .log_game_over(&id, *cause, record.points, record.enemies_killed)
            }
            _ => {}
        }
    }
}

/// Run a handler that may write the score store without stalling the
/// other tasks of a multi-threaded runtime
fn off_scheduler<T>(f: impl FnOnce() -> T) -> T {
    match Handle::current().runtime_flavor() {
        RuntimeFlavor::MultiThread => tokio::task::block_in_place(f),
        _ => f(),
    }
}

/// Spawn the session task
pub fn spawn_session(session: Session, commands: mpsc::UnboundedReceiver<ClientMessage>) -> JoinHandle<()> {
    tokio::spawn(run_session(session, commands))
}

/// Drive a session until its command channel or its outbox closes
pub async fn run_session(mut session: Session, mut commands: mpsc::UnboundedReceiver<ClientMessage>) {
    let config = *session.game.config();
    let tick = Duration::from_millis(config.tick_ms);
    let spawn = Duration::from_millis(config.spawn_interval_ms);
    let origin = Instant::now();
    let elapsed_ms = || origin.elapsed().as_millis() as u64;

    if !session.outbox.send(ServerMessage::welcome(&config)).await {
        return;
    }

    let started = session.game.start();
    if !session.publish(started).await {
        return;
    }
    let mut clocks = Clocks::arm(tick, spawn);

    info!("Session {} running", session.id);

    loop {
        let running = session.game.is_running();
        let deadline = session
            .game
            .next_materialization_ms()
            .map(|ms| origin + Duration::from_millis(ms));

        // Materialization before the tick sharing its instant, so the enemy
        // is drawn on its marker before it first moves
        let out = tokio::select! {
            biased;

            msg = commands.recv() => {
                let Some(msg) = msg else { break };
                let out = session.handle(msg);
                if !running && session.game.is_running() {
                    clocks = Clocks::arm(tick, spawn);
                }
                out
            }
            _ = sleep_until(deadline.unwrap_or(origin)), if running && deadline.is_some() => {
                session.game.materialize(elapsed_ms())
            }
            _ = clocks.simulation.tick(), if running => {
                // A terminal tick records the score
                off_scheduler(|| session.game.tick(elapsed_ms()))
            }
            _ = clocks.spawn.tick(), if running => {
                session.game.spawn(elapsed_ms())
            }
        };

        if !session.publish(out).await {
            debug!("Session {} client gone", session.id);
            break;
        }
    }

    info!("Session {} stopped", session.id);
}
