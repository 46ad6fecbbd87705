//! Collapse engine - per-column gravity compaction and refill
//!
//! Each column is handled on its own with a two-pointer scan from the bottom
//! row up: surviving blocks are copied down to a write pointer, then every
//! cell left above the pointer is refilled top-down with a new random block.
//! The grid is fully settled when the call returns; the returned moves are a
//! report for the animation layer, not a to-do list.

use crate::error::Result;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{Block, BlockMove, ColorId, Pos, SPAWN_ABOVE_VIEWPORT_ROWS};

/// Where new blocks notionally enter from, in grid rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOrigin {
    /// Top of the visible area is known (may be negative when the viewport
    /// shows space above the board)
    AboveViewport { top_row: i32 },
    /// No viewport information; spawn a fixed number of rows above row 0
    FixedOffset { rows_above: i32 },
}

impl SpawnOrigin {
    pub fn from_viewport(top_row: Option<i32>, rows_above: i32) -> Self {
        match top_row {
            Some(top_row) => SpawnOrigin::AboveViewport { top_row },
            None => SpawnOrigin::FixedOffset { rows_above },
        }
    }

    pub fn spawn_row(&self) -> i32 {
        match *self {
            SpawnOrigin::AboveViewport { top_row } => top_row.min(0) - SPAWN_ABOVE_VIEWPORT_ROWS,
            SpawnOrigin::FixedOffset { rows_above } => -rows_above,
        }
    }
}

/// Clear every block of `group` from the grid, returning the removed blocks.
pub fn remove_group(grid: &mut Grid, group: &[Block]) -> Result<Vec<Block>> {
    let mut removed = Vec::with_capacity(group.len());
    for block in group {
        if let Some(taken) = grid.take(block.row, block.col)? {
            removed.push(taken);
        }
    }
    Ok(removed)
}

/// Compact every column toward the bottom and refill the vacated top cells.
///
/// Moves are reported column by column: shifted survivors bottom-up, then new
/// blocks top-down. A block already resting at its write position is not
/// reported.
pub fn collapse_and_refill(
    grid: &mut Grid,
    rng: &mut impl RandomSource,
    color_count: ColorId,
    origin: SpawnOrigin,
) -> Result<Vec<BlockMove>> {
    let mut moves = Vec::new();
    for col in 0..grid.columns() {
        let top_empty = compact_column(grid, col, &mut moves)?;
        refill_column(grid, col, top_empty, rng, color_count, origin, &mut moves)?;
    }
    Ok(moves)
}

/// Two-pointer compaction of one column.
///
/// Returns the number of empty cells left at the top of the column.
fn compact_column(grid: &mut Grid, col: i32, moves: &mut Vec<BlockMove>) -> Result<i32> {
    let mut write_row = grid.rows() - 1;

    for read_row in (0..grid.rows()).rev() {
        let Some(block) = grid.get(read_row, col)? else {
            continue;
        };
        if read_row != write_row {
            grid.take(read_row, col)?;
            grid.set(write_row, col, Some(block))?;
            moves.push(BlockMove {
                block: block.id,
                color: block.color,
                from: Pos::new(read_row, col),
                to: Pos::new(write_row, col),
                is_new: false,
            });
        }
        write_row -= 1;
    }

    Ok(write_row + 1)
}

fn refill_column(
    grid: &mut Grid,
    col: i32,
    empty_rows: i32,
    rng: &mut impl RandomSource,
    color_count: ColorId,
    origin: SpawnOrigin,
    moves: &mut Vec<BlockMove>,
) -> Result<()> {
    let spawn_row = origin.spawn_row();
    for row in 0..empty_rows {
        let color = rng.next_below(color_count as u32) as ColorId;
        let block = grid.spawn(row, col, color)?;
        moves.push(BlockMove {
            block: block.id,
            color,
            from: Pos::new(spawn_row, col),
            to: Pos::new(row, col),
            is_new: true,
        });
    }
    Ok(())
}

/// True if no column has an empty cell below an occupied one.
pub fn is_compacted(grid: &Grid) -> bool {
    (0..grid.columns()).all(|col| {
        let mut seen_block = false;
        (0..grid.rows()).all(|row| {
            let occupied = grid.occupant(row, col).is_some();
            if occupied {
                seen_block = true;
                true
            } else {
                !seen_block
            }
        })
    })
}
