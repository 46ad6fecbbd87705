//! Reshuffle engine - unlocks a board that has no legal move
//!
//! The colors already on the board are redistributed, never re-rolled: the
//! occupied colors are shuffled, then two copies of one color are swapped
//! into a known adjacent pair of cells so at least one move exists.
//!
//! The forced pair is the only guarantee. Whether the rest of the board has
//! other matches is left to chance.

use log::warn;

use crate::error::Result;
use crate::grid::Grid;
use crate::moves::has_any_move;
use crate::rng::{shuffle, RandomSource};
use crate::types::{Block, ColorId, Pos, ShuffleReport};

/// Redistribute the board's colors and force one adjacent matching pair.
///
/// No-op for boards with fewer than two blocks.
pub fn smart_shuffle(grid: &mut Grid, rng: &mut impl RandomSource) -> Result<ShuffleReport> {
    // Row-major, so sorted by `Pos` ordering.
    let slots: Vec<Pos> = grid.iter_occupied().map(Block::pos).collect();
    if slots.len() < 2 {
        return Ok(ShuffleReport::skipped());
    }

    let mut colors: Vec<ColorId> = grid.iter_occupied().map(|b| b.color).collect();
    shuffle(&mut colors, rng);

    let pair = forced_pair(grid);
    let mut report = ShuffleReport {
        pair,
        forced_color: None,
        multiset_preserved: true,
    };

    let pair_slots = pair.and_then(|(first, second)| {
        Some((slots.binary_search(&first).ok()?, slots.binary_search(&second).ok()?))
    });

    match pair_slots {
        Some((a, b)) => {
            let forced = match first_repeated_color(&colors) {
                Some(color) => {
                    pull_into(&mut colors, color, a, None);
                    pull_into(&mut colors, color, b, Some(a));
                    color
                }
                None => {
                    // Every color is unique: a pair can only be made by overwriting.
                    let color = colors[0];
                    colors[a] = color;
                    colors[b] = color;
                    report.multiset_preserved = false;
                    warn!(
                        "reshuffle: all {} colors unique, overwrote {:?} with color {}",
                        slots.len(),
                        slots[b],
                        color
                    );
                    color
                }
            };
            report.forced_color = Some(forced);
        }
        None => {
            warn!("reshuffle: no adjacent occupied pair, a move cannot be forced");
        }
    }

    for (pos, color) in slots.iter().zip(&colors) {
        grid.recolor(pos.row, pos.col, *color)?;
    }

    if report.pair.is_some() && !has_any_move(grid) {
        warn!("reshuffle: board still locked after forcing a pair");
    }

    Ok(report)
}

/// The top-left cell and its right neighbor (bottom neighbor on single-column
/// boards). Falls back to the first adjacent occupied pair when either cell
/// is empty.
pub fn forced_pair(grid: &Grid) -> Option<(Pos, Pos)> {
    let first = Pos::new(0, 0);
    let mut second = if grid.columns() > 1 {
        first.right()
    } else {
        first.down()
    };
    if second.row >= grid.rows() {
        second = Pos::new(0, 1);
    }
    if second.col >= grid.columns() {
        second = Pos::new(1, 0);
    }

    let occupied = |p: Pos| grid.occupant(p.row, p.col).is_some();
    if occupied(first) && occupied(second) {
        return Some((first, second));
    }
    first_occupied_pair(grid)
}

fn first_occupied_pair(grid: &Grid) -> Option<(Pos, Pos)> {
    grid.iter_occupied().find_map(|block| {
        let here = block.pos();
        [here.right(), here.down()]
            .into_iter()
            .find(|next| grid.occupant(next.row, next.col).is_some())
            .map(|next| (here, next))
    })
}

/// First color in list order that occurs at least twice
fn first_repeated_color(colors: &[ColorId]) -> Option<ColorId> {
    let mut counts = [0u32; 256];
    for &color in colors {
        counts[color as usize] += 1;
    }
    colors
        .iter()
        .copied()
        .find(|&color| counts[color as usize] >= 2)
}

/// Swap a copy of `color` into `slot`, never taking it from `keep`
fn pull_into(colors: &mut [ColorId], color: ColorId, slot: usize, keep: Option<usize>) {
    if colors[slot] == color {
        return;
    }
    let source = colors
        .iter()
        .enumerate()
        .position(|(i, &c)| c == color && i != slot && Some(i) != keep);
    if let Some(source) = source {
        colors.swap(slot, source);
    }
}
