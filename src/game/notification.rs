//! Outputs of the game core, consumed by the session driver

use super::collision::CollisionKind;
use super::location::Location;
use super::state::Snapshot;
use crate::scores::ScoreRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A round began; hide the game-over banner
    Started,
    /// Redraw with this state
    Render(Snapshot),
    /// Score counter changed
    ScoreUpdated { points: u32 },
    /// Kill counter changed
    EnemiesKilled { count: u32 },
    /// The head reached food at `location`
    FoodEaten { location: Location },
    /// A spawn marker was placed
    MarkerPlaced { location: Location },
    /// Markers turned into enemies
    EnemiesMaterialized { count: usize },
    /// The round ended and was recorded
    GameOver {
        cause: CollisionKind,
        record: ScoreRecord,
        leaderboard: Vec<ScoreRecord>,
        history: Vec<String>,
    },
}
