//! Shared helpers for integration tests.
#![allow(dead_code)]

use tui_blast::core::{Grid, RandomSource, SimpleRng};
use tui_blast::types::ColorId;

/// Fully occupied random grid.
pub fn random_grid(rows: i32, columns: i32, colors: ColorId, seed: u32) -> Grid {
    let mut rng = SimpleRng::new(seed);
    let cells: Vec<Vec<Option<ColorId>>> = (0..rows)
        .map(|_| {
            (0..columns)
                .map(|_| Some(rng.next_below(colors as u32) as ColorId))
                .collect()
        })
        .collect();
    Grid::from_cells(&cells).unwrap()
}

/// Grid where every neighbor pair differs: `color = (row + 2 * col) % 3`.
pub fn locked_grid(rows: i32, columns: i32) -> Grid {
    let cells: Vec<Vec<Option<ColorId>>> = (0..rows)
        .map(|r| (0..columns).map(|c| Some(((r + 2 * c) % 3) as ColorId)).collect())
        .collect();
    Grid::from_cells(&cells).unwrap()
}

pub fn sorted_colors(grid: &Grid) -> Vec<ColorId> {
    let mut colors: Vec<ColorId> = grid.iter_occupied().map(|b| b.color).collect();
    colors.sort_unstable();
    colors
}

/// Always returns the same value (mod n).
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn next_below(&mut self, n: u32) -> u32 {
        self.0 % n
    }
}
