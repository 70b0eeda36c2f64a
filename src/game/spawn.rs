//! Two-phase enemy spawning: a marker appears, then an enemy replaces it

use rand::Rng;

use super::enemy::Enemy;
use super::location::{Board, Location};

/// Warning shown where an enemy is about to appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnMarker {
    /// Unique within a session
    pub id: u64,
    pub location: Location,
    /// Session time (ms) at which the enemy materializes
    pub ready_at_ms: u64,
    /// Round the marker was created in; stale rounds never materialize
    pub round: u64,
}

/// Pending spawns for one session
#[derive(Debug, Default)]
pub struct Spawner {
    markers: Vec<SpawnMarker>,
    next_id: u64,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a new marker on a random cell
    pub fn schedule<R: Rng>(
        &mut self,
        rng: &mut R,
        board: &Board,
        cell_size: i32,
        now_ms: u64,
        delay_ms: u64,
        round: u64,
    ) -> SpawnMarker {
        let location = Location::random(rng, board, cell_size);
        self.schedule_at(location, now_ms + delay_ms, round)
    }

    /// Put a new marker on a given cell
    pub fn schedule_at(&mut self, location: Location, ready_at_ms: u64, round: u64) -> SpawnMarker {
        let marker = SpawnMarker {
            id: self.next_id,
            location,
            ready_at_ms,
            round,
        };
        self.next_id += 1;
        self.markers.push(marker);
        marker
    }

    /// Turn every due marker of `round` into an enemy, removing it.
    /// Due markers from other rounds are discarded without an enemy.
    pub fn materialize(&mut self, now_ms: u64, round: u64) -> Vec<Enemy> {
        let mut enemies = Vec::new();
        self.markers.retain(|marker| {
            if marker.ready_at_ms > now_ms {
                return true;
            }
            if marker.round == round {
                enemies.push(Enemy::from(marker.location));
            }
            false
        });
        enemies
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.markers.iter().map(|m| m.ready_at_ms).min()
    }

    pub fn markers(&self) -> &[SpawnMarker] {
        &self.markers
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_marker_materializes_after_delay() {
        let mut rng = StdRng::seed_from_u64(5);
        let board = Board::new(800, 600);
        let mut spawner = Spawner::new();

        let marker = spawner.schedule(&mut rng, &board, 20, 0, 2000, 0);
        assert!(board.contains(&marker.location));
        assert_eq!(marker.ready_at_ms, 2000);

        assert!(spawner.materialize(1999, 0).is_empty());
        assert_eq!(spawner.markers().len(), 1);

        let enemies = spawner.materialize(2000, 0);
        assert_eq!(enemies, vec![Enemy::from(marker.location)]);
        assert!(spawner.markers().is_empty());

        // Exactly once
        assert!(spawner.materialize(5000, 0).is_empty());
    }

    #[test]
    fn test_markers_on_same_cell_are_independent() {
        let mut spawner = Spawner::new();
        let cell = Location::new(40, 40);
        spawner.schedule_at(cell, 2000, 0);
        spawner.schedule_at(cell, 5000, 0);

        assert_eq!(spawner.materialize(2000, 0).len(), 1);
        assert_eq!(spawner.markers().len(), 1);
        assert_eq!(spawner.next_deadline(), Some(5000));
    }

    #[test]
    fn test_stale_round_is_dropped() {
        let mut spawner = Spawner::new();
        spawner.schedule_at(Location::new(0, 0), 2000, 0);

        assert!(spawner.materialize(2500, 1).is_empty());
        assert!(spawner.markers().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut spawner = Spawner::new();
        let a = spawner.schedule_at(Location::new(0, 0), 10, 0);
        let b = spawner.schedule_at(Location::new(0, 0), 10, 0);
        assert_ne!(a.id, b.id);
        assert_eq!(spawner.next_deadline(), Some(10));
    }
}
