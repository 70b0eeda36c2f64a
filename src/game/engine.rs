//! Update engine - one simulation tick

use rand::Rng;
use tracing::debug;

use super::collision::{check_terminal, resolve_enemies, CollisionKind};
use super::notification::Notification;
use super::state::GameState;
use crate::config::GameConfig;

/// Advance the world by one tick.
///
/// Returns the collision that ended the round, if any. A terminal
/// wall/self collision stops the tick before food and enemies are looked
/// at; nothing is rendered in that case since the caller resets the state.
pub fn tick<R: Rng>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
    out: &mut Vec<Notification>,
) -> Option<CollisionKind> {
    let cell_size = config.cell_size;

    state.snake.advance(state.direction, cell_size);

    let head = state.snake.head();
    let speed = config.enemy_step();
    for enemy in state.enemies.iter_mut() {
        enemy.pursue(head, speed);
    }

    if let Some(kind) = check_terminal(&state.snake, &state.board) {
        debug!("Terminal collision: {:?} at {:?}", kind, head);
        return Some(kind);
    }

    if state.food.is_at(&head) {
        state.snake.grow();
        state.food.respawn(rng, &state.board, cell_size, &state.snake);
        state.points += 1;
        out.push(Notification::FoodEaten { location: head });
        out.push(Notification::ScoreUpdated {
            points: state.points,
        });
    }

    let outcome = resolve_enemies(&mut state.enemies, &state.snake, cell_size);
    if outcome.killed > 0 {
        state.enemies_killed += outcome.killed;
        debug!("{} enemies killed (total {})", outcome.killed, state.enemies_killed);
        out.push(Notification::EnemiesKilled {
            count: state.enemies_killed,
        });
    }
    if outcome.head_hit {
        return Some(CollisionKind::Enemy);
    }

    out.push(Notification::Render(state.snapshot()));
    None
}
