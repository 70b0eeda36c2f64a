//! Protocol messages for WebSocket communication

use serde::Serialize;

use crate::config::GameConfig;
use crate::game::collision::CollisionKind;
use crate::game::direction::Direction;
use crate::game::notification::Notification;
use crate::game::state::Snapshot;
use crate::scores::ScoreRecord;

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// Direction change command
    Direction(Direction),
    /// Start a new round after game over
    Restart,
    /// Browser viewport changed
    Resize { width: i32, height: i32 },
    /// Ping to keep connection alive
    Ping,
}

impl ClientMessage {
    /// Parse a client message from a text frame
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        // Check for direction commands
        if let Some(dir) = Direction::from_str(s) {
            return Some(ClientMessage::Direction(dir));
        }

        let mut parts = s.split_whitespace();
        match parts.next()?.to_lowercase().as_str() {
            "restart" => Some(ClientMessage::Restart),
            "ping" => Some(ClientMessage::Ping),
            "resize" => {
                let width = parts.next()?.parse().ok()?;
                let height = parts.next()?.parse().ok()?;
                if parts.next().is_some() {
                    return None;
                }
                Some(ClientMessage::Resize { width, height })
            }
            _ => None,
        }
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Session parameters, sent once on connect
    #[serde(rename_all = "camelCase")]
    Welcome {
        width: i32,
        height: i32,
        cell_size: i32,
        tick_ms: u64,
    },
    /// Round started; hide the game-over banner
    Started,
    /// Full entity state to draw
    Update(Snapshot),
    /// Points counter
    Score { points: u32 },
    /// Enemies-killed counter
    Kills { count: u32 },
    /// Round ended
    #[serde(rename_all = "camelCase")]
    GameOver {
        cause: CollisionKind,
        points: u32,
        enemies_killed: u32,
        leaderboard: Vec<ScoreRecord>,
        history: Vec<String>,
    },
}

impl ServerMessage {
    pub fn welcome(config: &GameConfig) -> Self {
        ServerMessage::Welcome {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
            tick_ms: config.tick_ms,
        }
    }

    /// Wire message for a core notification, if the client cares about it
    pub fn from_notification(notification: &Notification) -> Option<Self> {
        let msg = match notification {
            Notification::Started => ServerMessage::Started,
            Notification::Render(snapshot) => ServerMessage::Update(snapshot.clone()),
            Notification::ScoreUpdated { points } => ServerMessage::Score { points: *points },
            Notification::EnemiesKilled { count } => ServerMessage::Kills { count: *count },
            Notification::GameOver {
                cause,
                record,
                leaderboard,
                history,
            } => ServerMessage::GameOver {
                cause: *cause,
                points: record.points,
                enemies_killed: record.enemies_killed,
                leaderboard: leaderboard.clone(),
                history: history.clone(),
            },
            Notification::FoodEaten { .. }
            | Notification::MarkerPlaced { .. }
            | Notification::EnemiesMaterialized { .. } => return None,
        };
        Some(msg)
    }

    /// Serialize message to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::location::{Location, Point};

    #[test]
    fn test_parse_direction() {
        assert_eq!(
            ClientMessage::parse("up"),
            Some(ClientMessage::Direction(Direction::North))
        );
        assert_eq!(
            ClientMessage::parse(" left\n"),
            Some(ClientMessage::Direction(Direction::West))
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ClientMessage::parse("restart"), Some(ClientMessage::Restart));
        assert_eq!(ClientMessage::parse("ping"), Some(ClientMessage::Ping));
        assert_eq!(
            ClientMessage::parse("resize 1024 768"),
            Some(ClientMessage::Resize {
                width: 1024,
                height: 768
            })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(ClientMessage::parse(""), None);
        assert_eq!(ClientMessage::parse("jump"), None);
        assert_eq!(ClientMessage::parse("resize 10"), None);
        assert_eq!(ClientMessage::parse("resize a b"), None);
        assert_eq!(ClientMessage::parse("resize 1 2 3"), None);
    }

    #[test]
    fn test_server_message_json() {
        assert_eq!(ServerMessage::Started.to_json(), r#"{"type":"started"}"#);
        assert_eq!(
            ServerMessage::Kills { count: 3 }.to_json(),
            r#"{"type":"kills","count":3}"#
        );
        assert_eq!(
            ServerMessage::welcome(&GameConfig::default()).to_json(),
            r#"{"type":"welcome","width":800,"height":600,"cellSize":20,"tickMs":100}"#
        );
    }

    #[test]
    fn test_update_json() {
        let msg = ServerMessage::Update(Snapshot {
            snake: vec![Location::new(20, 40)],
            food: Location::new(0, 0),
            enemies: vec![Point::new(2.5, 3.0)],
            markers: vec![],
        });
        assert_eq!(
            msg.to_json(),
            r#"{"type":"update","snake":[{"x":20,"y":40}],"food":{"x":0,"y":0},"enemies":[{"x":2.5,"y":3.0}],"markers":[]}"#
        );
    }

    #[test]
    fn test_game_over_json() {
        let notification = Notification::GameOver {
            cause: CollisionKind::SelfCollision,
            record: ScoreRecord::new(5, 2),
            leaderboard: vec![ScoreRecord::new(5, 2)],
            history: vec!["Record 1".to_string()],
        };
        let msg = ServerMessage::from_notification(&notification).unwrap();
        assert_eq!(
            msg.to_json(),
            r#"{"type":"gameover","cause":"self_collision","points":5,"enemiesKilled":2,"leaderboard":[{"points":5,"enemiesKilled":2}],"history":["Record 1"]}"#
        );
    }

    #[test]
    fn test_internal_notifications_not_sent() {
        let n = Notification::FoodEaten {
            location: Location::new(0, 0),
        };
        assert!(ServerMessage::from_notification(&n).is_none());
    }
}
