use std::collections::VecDeque;

use crate::board::Board;
use crate::error::GameError;
use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(row, col)` delta of one step.
    pub fn offset(self) -> (i16, i16) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn step(self, pos: Coords) -> Coords {
        let (dr, dc) = self.offset();
        (pos.0 + dr, pos.1 + dc)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    None,
    Wall,
    SelfHit,
}

/// Snake body stored tail first: index 0 is the tail, the last index is the head.
///
/// The body lives in a ring buffer allocated once with the snake's capacity, so a
/// move is a pop at the tail plus a push at the head instead of shifting every
/// segment.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Coords>,
    capacity: usize,
}

impl Snake {
    /// A one-segment snake at `head`.
    pub fn new(head: Coords, capacity: usize) -> Self {
        let mut body = VecDeque::with_capacity(capacity.max(1));
        body.push_back(head);
        Snake { body, capacity: capacity.max(1) }
    }

    /// Builds a snake from segments listed tail first.
    pub fn from_body(segments: &[Coords], capacity: usize) -> Result<Self, GameError> {
        if segments.is_empty() {
            return Err(GameError::EmptyBody);
        }
        if segments.len() > capacity {
            return Err(GameError::CapacityExceeded { capacity });
        }

        let mut body = VecDeque::with_capacity(capacity);
        body.extend(segments.iter().copied());
        Ok(Snake { body, capacity })
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn head(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Coords {
        self.body[0]
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Moves every segment one slot toward the tail and puts a new head one cell
    /// away from the old head in `direction`. Returns the cell the tail left.
    pub fn advance(&mut self, direction: Direction) -> Coords {
        let new_head = direction.step(self.head());
        let old_tail = self.body.pop_front().unwrap_or(new_head);
        self.body.push_back(new_head);
        old_tail
    }

    /// Wall hits are reported before self hits.
    pub fn check_collision(&self, board: &Board) -> Collision {
        let head = self.head();

        if board.is_wall(head) {
            return Collision::Wall;
        }

        let neck_end = self.body.len() - 1;
        if self.body.range(..neck_end).any(|&seg| seg == head) {
            return Collision::SelfHit;
        }

        Collision::None
    }

    /// Lengthens the snake by one by duplicating the tail segment. The copy
    /// separates from the tail on the next move.
    pub fn grow(&mut self) -> Result<(), GameError> {
        if self.body.len() >= self.capacity {
            return Err(GameError::CapacityExceeded { capacity: self.capacity });
        }

        let tail = self.tail();
        self.body.push_front(tail);
        Ok(())
    }
}
