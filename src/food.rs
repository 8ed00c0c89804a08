use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Lists every cell in row-major order that the snake does not occupy.
#[must_use]
pub fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Position> {
    let occupied: HashSet<Position> = snake.segments().copied().collect();
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(occupied.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !occupied.contains(&position) {
                candidates.push(position);
            }
        }
    }

    candidates
}

/// Picks a free cell uniformly at random, or `None` when the snake fills the board.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    free_cells(bounds, snake).choose(rng).copied()
}
