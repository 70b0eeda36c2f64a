//! Positions on the playfield

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

use super::direction::Direction;

/// A grid-aligned position in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Create a new location
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Get the location one cell away in the given direction.
    /// No wrapping: leaving the board is a collision.
    pub fn adjacent(&self, direction: Direction, cell_size: i32) -> Location {
        let (dx, dy) = direction.delta(cell_size);
        Location::new(self.x + dx, self.y + dy)
    }

    /// Pick a random cell-aligned location inside the board
    pub fn random<R: Rng>(rng: &mut R, board: &Board, cell_size: i32) -> Self {
        // Partial trailing cells still count, as long as their origin is on the board
        let columns = board.width / cell_size + i32::from(board.width % cell_size != 0);
        let rows = board.height / cell_size + i32::from(board.height % cell_size != 0);

        let x = rng.gen_range(0..columns.max(1)) * cell_size;
        let y = rng.gen_range(0..rows.max(1)) * cell_size;

        Location::new(x, y)
    }
}

/// A free-moving position, used by enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both axes are strictly closer than `reach`
    pub fn is_near(&self, loc: &Location, reach: f64) -> bool {
        (self.x - f64::from(loc.x)).abs() < reach && (self.y - f64::from(loc.y)).abs() < reach
    }
}

impl From<Location> for Point {
    fn from(loc: Location) -> Self {
        Self::new(f64::from(loc.x), f64::from(loc.y))
    }
}

/// Playfield bounds in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check whether a location lies in `[0, width) x [0, height)`
    pub fn contains(&self, loc: &Location) -> bool {
        loc.x >= 0 && loc.x < self.width && loc.y >= 0 && loc.y < self.height
    }

    /// Center of the board, snapped down to the grid
    pub fn center(&self, cell_size: i32) -> Location {
        Location::new(
            (self.width / 2) / cell_size * cell_size,
            (self.height / 2) / cell_size * cell_size,
        )
    }
}
