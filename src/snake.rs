use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one step in `direction`.
    ///
    /// The result may lie outside any grid; callers check bounds.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body as an ordered run of cells, head at the front.
///
/// The body is never empty. Mutation is reserved for the tick engine.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Creates a straight snake of `length` cells heading in `heading`,
    /// with the body trailing behind the head.
    #[must_use]
    pub fn straight(head: Position, heading: Direction, length: usize) -> Self {
        let trailing = heading.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.stepped(trailing);
            body.push_back(cell);
        }

        Self { body }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count, never zero.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Returns true when two segments share a cell.
    #[must_use]
    pub fn has_overlap(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .any(|(index, cell)| self.body.iter().skip(index + 1).any(|other| other == cell))
    }

    pub(crate) fn push_head(&mut self, position: Position) {
        self.body.push_front(position);
    }

    pub(crate) fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }
}
