//! Move availability - does the board hold any removable pair?
//!
//! Two same-colored neighbors already form a group of size two, so checking
//! each block's right and bottom neighbor is enough to cover every pair.

use crate::grid::Grid;
use crate::types::Pos;

/// First adjacent same-color pair in row-major order, if any
pub fn find_any_move(grid: &Grid) -> Option<(Pos, Pos)> {
    for block in grid.iter_occupied() {
        let here = block.pos();
        for next in [here.right(), here.down()] {
            if grid
                .occupant(next.row, next.col)
                .is_some_and(|other| other.color == block.color)
            {
                return Some((here, next));
            }
        }
    }
    None
}

/// False only for a locked board: no two adjacent blocks share a color.
pub fn has_any_move(grid: &Grid) -> bool {
    find_any_move(grid).is_some()
}
