//! Collision detection logic

use serde::Serialize;

use super::enemy::Enemy;
use super::location::Board;
use super::snake::Snake;

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfCollision,
    /// An enemy reached the head
    Enemy,
}

impl CollisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionKind::Wall => "wall",
            CollisionKind::SelfCollision => "self_collision",
            CollisionKind::Enemy => "enemy",
        }
    }
}

/// Result of resolving enemies against the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyOutcome {
    /// Enemies removed by touching the body
    pub killed: u32,
    /// A surviving enemy touches the head
    pub head_hit: bool,
}

/// Check the conditions that end the game on their own
pub fn check_terminal(snake: &Snake, board: &Board) -> Option<CollisionKind> {
    if !board.contains(&snake.head()) {
        return Some(CollisionKind::Wall);
    }
    if snake.bites_itself() {
        return Some(CollisionKind::SelfCollision);
    }
    None
}

/// Remove every enemy touching a non-head segment, then report whether
/// any survivor touches the head.
pub fn resolve_enemies(enemies: &mut Vec<Enemy>, snake: &Snake, cell_size: i32) -> EnemyOutcome {
    let before = enemies.len();
    enemies.retain(|enemy| !snake.tail_segments().any(|segment| enemy.touches(segment, cell_size)));
    let killed = (before - enemies.len()) as u32;

    let head = snake.head();
    let head_hit = enemies.iter().any(|enemy| enemy.touches(&head, cell_size));

    EnemyOutcome { killed, head_hit }
}
