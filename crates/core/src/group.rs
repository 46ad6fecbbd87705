//! Group finder - breadth-first flood fill over same-colored neighbors
//!
//! A group is the maximal set of occupied cells sharing the seed's color and
//! connected through up/down/left/right steps. Membership depends only on
//! that relation; the neighbor order (up, down, left, right) only decides the
//! order in which members are reported.
//!
//! The same flood fill drives the whole-board tier pass, which floods every
//! group once under a single pass id.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::error::Result;
use crate::grid::Grid;
use crate::types::{Block, ColorId, Pos, Tier, TierThresholds};

/// Find the group containing (row, col).
///
/// Returns an empty vector for an empty seed cell. Fails with `OutOfBounds`
/// for a seed outside the grid.
pub fn find_group(grid: &mut Grid, row: i32, col: i32) -> Result<Vec<Block>> {
    // Validate before burning a pass id.
    grid.get(row, col)?;
    let pass = grid.begin_new_pass();
    flood(grid, Pos::new(row, col), pass)
}

/// Flood from `seed` under an already started pass.
///
/// Cells already marked with `pass` are treated as visited, which lets the
/// tier pass skip groups it has flooded before.
pub(crate) fn flood(grid: &mut Grid, seed: Pos, pass: u64) -> Result<Vec<Block>> {
    let mut group = Vec::new();
    let Some(start) = grid.get_pos(seed)? else {
        return Ok(group);
    };

    let mut queue = VecDeque::new();
    grid.mark_visited(seed.row, seed.col, pass)?;
    queue.push_back(seed);

    while let Some(pos) = queue.pop_front() {
        let Some(block) = grid.get_pos(pos)? else {
            continue;
        };
        group.push(block);

        for next in same_color_neighbors(grid, pos, start.color, pass)? {
            grid.mark_visited(next.row, next.col, pass)?;
            queue.push_back(next);
        }
    }

    Ok(group)
}

/// In-bounds, unvisited neighbors of `pos` holding `color`
fn same_color_neighbors(
    grid: &Grid,
    pos: Pos,
    color: ColorId,
    pass: u64,
) -> Result<ArrayVec<Pos, 4>> {
    let mut out = ArrayVec::new();
    for next in pos.neighbors() {
        if !grid.in_bounds(next.row, next.col) || grid.is_visited(next.row, next.col, pass)? {
            continue;
        }
        if grid.occupant(next.row, next.col).map(|b| b.color) == Some(color) {
            out.push(next);
        }
    }
    Ok(out)
}

/// Per-cell tier and group size for the whole board.
///
/// Derived data for presentation only; recomputed after every structural
/// change to the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TierMap {
    columns: i32,
    /// Row-major; None for empty cells
    cells: Vec<Option<(Tier, u32)>>,
}

impl TierMap {
    pub fn tier(&self, row: i32, col: i32) -> Option<Tier> {
        self.entry(row, col).map(|(tier, _)| tier)
    }

    pub fn group_size(&self, row: i32, col: i32) -> Option<u32> {
        self.entry(row, col).map(|(_, size)| size)
    }

    fn entry(&self, row: i32, col: i32) -> Option<(Tier, u32)> {
        if row < 0 || col < 0 || col >= self.columns {
            return None;
        }
        let idx = (row as usize) * (self.columns as usize) + col as usize;
        self.cells.get(idx).copied().flatten()
    }

    /// Row-major tiers (None = empty cell)
    pub fn tiers(&self) -> impl Iterator<Item = Option<Tier>> + '_ {
        self.cells.iter().map(|cell| cell.map(|(tier, _)| tier))
    }
}

/// Assign every occupied cell the tier of the group it belongs to.
///
/// Walks the board row-major under one pass id; a cell reached by an earlier
/// flood is skipped, so each cell is visited once.
pub fn classify_tiers(grid: &mut Grid, thresholds: &TierThresholds) -> Result<TierMap> {
    let mut map = TierMap {
        columns: grid.columns(),
        cells: vec![None; grid.len()],
    };
    let pass = grid.begin_new_pass();

    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            if grid.occupant(row, col).is_none() || grid.is_visited(row, col, pass)? {
                continue;
            }
            let group = flood(grid, Pos::new(row, col), pass)?;
            let size = group.len();
            let tier = thresholds.tier_for(size);
            for block in &group {
                let idx = (block.row as usize) * (grid.columns() as usize) + block.col as usize;
                map.cells[idx] = Some((tier, size as u32));
            }
        }
    }

    Ok(map)
}
