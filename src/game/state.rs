//! Entity state of one session

use rand::Rng;
use serde::Serialize;

use super::direction::Direction;
use super::enemy::Enemy;
use super::food::Food;
use super::location::{Board, Location, Point};
use super::snake::Snake;
use super::spawn::Spawner;
use crate::config::GameConfig;

/// All mutable entities of a game, owned by the lifecycle controller
#[derive(Debug)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    /// Latched by input, read once per tick
    pub direction: Direction,
    pub food: Food,
    pub enemies: Vec<Enemy>,
    pub spawner: Spawner,
    pub points: u32,
    pub enemies_killed: u32,
    /// Incremented on every reset
    pub round: u64,
}

impl GameState {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let board = Board::new(config.width, config.height);
        let snake = Snake::new(board.center(config.cell_size));
        let food = Food::random(rng, &board, config.cell_size, &snake);

        Self {
            board,
            snake,
            direction: Direction::None,
            food,
            enemies: Vec::new(),
            spawner: Spawner::new(),
            points: 0,
            enemies_killed: 0,
            round: 0,
        }
    }

    /// Back to a fresh round on the current board
    pub fn reset<R: Rng>(&mut self, rng: &mut R, cell_size: i32) {
        self.snake.reset(self.board.center(cell_size));
        self.direction = Direction::None;
        self.food.respawn(rng, &self.board, cell_size, &self.snake);
        self.enemies.clear();
        self.spawner.clear();
        self.points = 0;
        self.enemies_killed = 0;
        self.round += 1;
    }

    /// Immutable copy of everything the renderer draws
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food.location,
            enemies: self.enemies.iter().map(|e| e.position).collect(),
            markers: self.spawner.markers().iter().map(|m| m.location).collect(),
        }
    }
}

/// Render payload, head first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake: Vec<Location>,
    pub food: Location,
    pub enemies: Vec<Point>,
    pub markers: Vec<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_state_is_centered() {
        let mut rng = StdRng::seed_from_u64(0);
        let state = GameState::new(&GameConfig::default(), &mut rng);

        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Location::new(400, 300));
        assert_eq!(state.direction, Direction::None);
        assert!(state.enemies.is_empty());
        assert_eq!(state.round, 0);
    }

    #[test]
    fn test_reset_clears_entities() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GameConfig::default();
        let mut state = GameState::new(&config, &mut rng);

        state.snake.grow();
        state.direction = Direction::East;
        state.enemies.push(Enemy::from(Location::new(0, 0)));
        state.spawner.schedule_at(Location::new(20, 20), 2000, 0);
        state.points = 4;
        state.enemies_killed = 2;

        state.reset(&mut rng, config.cell_size);

        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.direction, Direction::None);
        assert!(state.enemies.is_empty());
        assert!(state.spawner.markers().is_empty());
        assert_eq!(state.points, 0);
        assert_eq!(state.enemies_killed, 0);
        assert_eq!(state.round, 1);
    }

    #[test]
    fn test_snapshot_contents() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = GameState::new(&GameConfig::default(), &mut rng);
        state.enemies.push(Enemy::from(Location::new(40, 60)));
        state.spawner.schedule_at(Location::new(80, 80), 2000, 0);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.snake, vec![Location::new(400, 300)]);
        assert_eq!(snapshot.food, state.food.location);
        assert_eq!(snapshot.enemies, vec![Point::new(40.0, 60.0)]);
        assert_eq!(snapshot.markers, vec![Location::new(80, 80)]);
    }
}
