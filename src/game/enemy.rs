//! Enemies chase the snake head

use super::location::{Location, Point};

/// A pursuing enemy. Velocity is recomputed from the head every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub position: Point,
}

impl Enemy {
    pub fn at(position: Point) -> Self {
        Self { position }
    }

    /// Step `speed` pixels along the unit vector toward `target`.
    ///
    /// Standing exactly on the target leaves the enemy in place; the
    /// collision pass of the same tick resolves the contact.
    pub fn pursue(&mut self, target: Location, speed: f64) {
        let dx = f64::from(target.x) - self.position.x;
        let dy = f64::from(target.y) - self.position.y;
        let distance = dx.hypot(dy);

        if distance == 0.0 {
            return;
        }

        self.position.x += dx / distance * speed;
        self.position.y += dy / distance * speed;
    }

    /// Within one cell on both axes
    pub fn touches(&self, loc: &Location, cell_size: i32) -> bool {
        self.position.is_near(loc, f64::from(cell_size))
    }
}

impl From<Location> for Enemy {
    fn from(loc: Location) -> Self {
        Self::at(loc.into())
    }
}
