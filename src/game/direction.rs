//! Direction enum for snake movement

use serde::{Deserialize, Serialize};

/// Direction of movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// No movement
    #[default]
    None,
    /// Moving up
    North,
    /// Moving down
    South,
    /// Moving left
    West,
    /// Moving right
    East,
}

impl Direction {
    /// Parse direction from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Direction::None),
            "north" | "up" => Some(Direction::North),
            "south" | "down" => Some(Direction::South),
            "west" | "left" => Some(Direction::West),
            "east" | "right" => Some(Direction::East),
            _ => None,
        }
    }

    /// Pixel offset of one step in this direction
    pub fn delta(&self, cell_size: i32) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::North => (0, -cell_size),
            Direction::South => (0, cell_size),
            Direction::West => (-cell_size, 0),
            Direction::East => (cell_size, 0),
        }
    }

    /// True when the two directions travel along different axes
    pub fn is_perpendicular(&self, other: &Direction) -> bool {
        self.is_moving() && other.is_moving() && self.is_horizontal() != other.is_horizontal()
    }

    /// Whether a snake currently heading `self` may turn to `requested`.
    /// Any first move is allowed; afterwards only quarter turns are.
    pub fn accepts(&self, requested: Direction) -> bool {
        if !requested.is_moving() {
            return false;
        }
        !self.is_moving() || self.is_perpendicular(&requested)
    }

    /// Check if the snake is moving (not None)
    pub fn is_moving(&self) -> bool {
        !matches!(self, Direction::None)
    }

    fn is_horizontal(&self) -> bool {
        matches!(self, Direction::West | Direction::East)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVING: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    #[test]
    fn test_from_str() {
        assert_eq!(Direction::from_str("north"), Some(Direction::North));
        assert_eq!(Direction::from_str("UP"), Some(Direction::North));
        assert_eq!(Direction::from_str("right"), Some(Direction::East));
        assert_eq!(Direction::from_str("invalid"), None);
    }

    #[test]
    fn test_first_move_always_accepted() {
        for d in MOVING {
            assert!(Direction::None.accepts(d));
        }
    }

    #[test]
    fn test_accepts_only_perpendicular() {
        for current in MOVING {
            for requested in MOVING {
                let expected = current.is_perpendicular(&requested);
                assert_eq!(
                    current.accepts(requested),
                    expected,
                    "{current:?} -> {requested:?}"
                );
            }
        }
        assert!(!Direction::East.accepts(Direction::West));
        assert!(!Direction::East.accepts(Direction::East));
        assert!(Direction::East.accepts(Direction::North));
    }

    #[test]
    fn test_none_request_rejected() {
        assert!(!Direction::East.accepts(Direction::None));
        assert!(!Direction::None.accepts(Direction::None));
    }
}
