//! Snake entity

use std::collections::VecDeque;

use super::direction::Direction;
use super::location::Location;

/// The player's snake. Head is the front of the deque, tail the back.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Location>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Location) -> Self {
        let mut body = VecDeque::with_capacity(16);
        body.push_front(head);
        Self { body }
    }

    /// Build a snake from explicit segments, head first
    #[cfg(test)]
    pub fn from_segments(segments: impl IntoIterator<Item = Location>) -> Self {
        let body: VecDeque<Location> = segments.into_iter().collect();
        assert!(!body.is_empty(), "snake needs at least one segment");
        Self { body }
    }

    /// Get the snake's head location
    pub fn head(&self) -> Location {
        // Length never drops below one: `advance` pushes before it pops
        self.body[0]
    }

    /// Every segment, head first
    pub fn segments(&self) -> impl Iterator<Item = &Location> {
        self.body.iter()
    }

    /// Every segment except the head
    pub fn tail_segments(&self) -> impl Iterator<Item = &Location> {
        self.body.iter().skip(1)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Translate one cell: push a new head, drop the tail
    pub fn advance(&mut self, direction: Direction, cell_size: i32) {
        if !direction.is_moving() {
            return;
        }

        let new_head = self.head().adjacent(direction, cell_size);
        self.body.push_front(new_head);
        self.body.pop_back();
    }

    /// Duplicate the tail segment; it separates on the next move
    pub fn grow(&mut self) {
        if let Some(tail) = self.body.back().copied() {
            self.body.push_back(tail);
        }
    }

    /// True when the head overlaps any other segment
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.tail_segments().any(|segment| *segment == head)
    }

    /// True when any segment, head included, sits on `loc`
    pub fn occupies(&self, loc: &Location) -> bool {
        self.body.contains(loc)
    }

    /// Shrink back to a single segment at `head`
    pub fn reset(&mut self, head: Location) {
        self.body.clear();
        self.body.push_front(head);
    }
}
