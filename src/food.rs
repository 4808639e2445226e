use log::warn;
use rand::Rng;

use crate::config::{FOOD_SAMPLE_ATTEMPTS, GridSize};
use crate::snake::{Position, Snake};

/// Picks a uniformly random cell not covered by `snake`.
///
/// Rejection sampling is tried first. After [`FOOD_SAMPLE_ATTEMPTS`] misses
/// the free cells are enumerated and one is chosen from that list, so a
/// crowded board still terminates. Returns `None` only when the snake covers
/// every cell.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let side = i32::from(grid.side());
    if side == 0 {
        return None;
    }

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..side), rng.gen_range(0..side));
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    warn!(
        "food sampling missed {FOOD_SAMPLE_ATTEMPTS} times on a {side}x{side} grid with {} occupied cells; scanning",
        snake.len()
    );
    scan_free_cell(rng, grid, snake)
}

fn scan_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let side = i32::from(grid.side());
    let free: Vec<Position> = (0..side)
        .flat_map(|y| (0..side).map(move |x| Position::new(x, y)))
        .filter(|cell| !snake.occupies(*cell))
        .collect();

    if free.is_empty() {
        return None;
    }

    Some(free[rng.gen_range(0..free.len())])
}
