//! Food placement.

use std::collections::HashSet;

use log::trace;
use rand::{seq::SliceRandom, Rng};

use crate::snake::{Cell, Snake};

/// Picks a cell uniformly among those the snake does not occupy, or `None`
/// when the board is full.
///
/// A snake as long as the board has area counts as filling it, even while its
/// freshly grown tail still overlaps the segment ahead of it. The scan is
/// linear in grid area, which `Config::validate` keeps bounded.
pub fn place_food<R: Rng + ?Sized>(snake: &Snake, width: i32, height: i32, rng: &mut R) -> Option<Cell> {
    if snake.len() >= width.max(0) as usize * height.max(0) as usize {
        return None;
    }

    let occupied: HashSet<Cell> = snake.body().iter().copied().collect();
    let free: Vec<Cell> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Cell::new(x, y)))
        .filter(|cell| !occupied.contains(cell))
        .collect();

    let food = free.choose(rng).copied()?;
    trace!("placed food at {} ({} free cells)", food, free.len());
    Some(food)
}
