//! Food entity - spawns randomly on the map

use rand::Rng;

use super::location::{Board, Location};
use super::snake::Snake;
use crate::config::FOOD_PLACEMENT_ATTEMPTS;

/// The single food item on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Position of the food
    pub location: Location,
}

impl Food {
    /// Create food at a specific location
    pub fn at(location: Location) -> Self {
        Self { location }
    }

    /// Place food on a random cell, preferring cells the snake does not cover.
    /// Best effort: after a bounded number of draws the last one is kept.
    pub fn random<R: Rng>(rng: &mut R, board: &Board, cell_size: i32, snake: &Snake) -> Self {
        let mut location = Location::random(rng, board, cell_size);
        for _ in 1..FOOD_PLACEMENT_ATTEMPTS {
            if !snake.occupies(&location) {
                break;
            }
            location = Location::random(rng, board, cell_size);
        }
        Self { location }
    }

    /// Respawn food at a new random position
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, board: &Board, cell_size: i32, snake: &Snake) {
        *self = Self::random(rng, board, cell_size, snake);
    }

    /// Check if a location matches the food position
    pub fn is_at(&self, loc: &Location) -> bool {
        self.location == *loc
    }
}
