//! Grid module - owns the board cells and flood-fill visitation marks
//!
//! The grid is a `rows x columns` rectangle stored as a flat row-major array,
//! one [`Cell`] per position. Row 0 is the top. Every occupied cell's block
//! carries its own `(row, col)`; the grid keeps that equal to the cell key.
//!
//! Visitation marks live in a parallel array. Instead of clearing the marks
//! between flood fills, each fill asks for a fresh pass id and a cell counts
//! as visited only if its mark equals the current id.
//!
//! Any coordinate outside the grid is an invariant violation and reported as
//! [`BoardError::OutOfBounds`]; nothing is clamped.

use crate::config::validate_dimensions;
use crate::error::{BoardError, Result};
use crate::types::{Block, BlockId, Cell, ColorId, Pos};

#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    columns: i32,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
    /// Last pass id that visited each cell
    marks: Vec<u64>,
    pass_id: u64,
    next_block_id: u32,
}

/// Grids are equal when they hold the same blocks in the same cells.
/// Visitation marks and the id counter are bookkeeping and not compared.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.columns == other.columns && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: i32, columns: i32) -> Result<Self> {
        validate_dimensions(rows, columns)?;
        let len = (rows as usize) * (columns as usize);
        Ok(Self {
            rows,
            columns,
            cells: vec![None; len],
            marks: vec![0; len],
            pass_id: 0,
            next_block_id: 0,
        })
    }

    /// Build a fully occupied grid from rows of colors
    pub fn from_color_rows<const N: usize>(rows: &[[ColorId; N]]) -> Result<Self> {
        let cells: Vec<Vec<Option<ColorId>>> = rows
            .iter()
            .map(|row| row.iter().copied().map(Some).collect())
            .collect();
        Self::from_cells(&cells)
    }

    /// Build a grid from rows of optional colors (None = empty cell).
    ///
    /// All rows must have the same length.
    pub fn from_cells(rows: &[Vec<Option<ColorId>>]) -> Result<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len()) as i32;
        if rows.iter().any(|r| r.len() as i32 != width) {
            return Err(BoardError::InvalidConfiguration(
                "grid rows must all have the same length".into(),
            ));
        }

        let mut grid = Self::new(height, width)?;
        for (row, colors) in rows.iter().enumerate() {
            for (col, color) in colors.iter().enumerate() {
                if let Some(color) = color {
                    grid.spawn(row as i32, col as i32, *color)?;
                }
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.columns
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Result<usize> {
        if !self.in_bounds(row, col) {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok((row as usize) * (self.columns as usize) + (col as usize))
    }

    pub fn get(&self, row: i32, col: i32) -> Result<Cell> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    pub fn get_pos(&self, pos: Pos) -> Result<Cell> {
        self.get(pos.row, pos.col)
    }

    /// Occupant of an in-bounds cell, or None for empty and off-board cells.
    ///
    /// For neighbor lookups, where stepping off the board is expected.
    pub fn occupant(&self, row: i32, col: i32) -> Option<&Block> {
        let idx = self.index(row, col).ok()?;
        self.cells[idx].as_ref()
    }

    pub fn color_at(&self, row: i32, col: i32) -> Result<Option<ColorId>> {
        Ok(self.get(row, col)?.map(|b| b.color))
    }

    /// Store `cell` at (row, col), rewriting the occupant's coordinates to match.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = cell.map(|block| Block { row, col, ..block });
        Ok(())
    }

    /// Remove and return the occupant of (row, col)
    pub fn take(&mut self, row: i32, col: i32) -> Result<Cell> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx].take())
    }

    /// Place a new block with a fresh id at (row, col)
    pub fn spawn(&mut self, row: i32, col: i32, color: ColorId) -> Result<Block> {
        let idx = self.index(row, col)?;
        let block = Block {
            id: BlockId(self.next_block_id),
            color,
            row,
            col,
        };
        self.next_block_id = self.next_block_id.wrapping_add(1);
        self.cells[idx] = Some(block);
        Ok(block)
    }

    /// Change the color of an occupied cell. Empty cells are left untouched.
    ///
    /// Returns whether a block was recolored.
    pub fn recolor(&mut self, row: i32, col: i32, color: ColorId) -> Result<bool> {
        let idx = self.index(row, col)?;
        match self.cells[idx].as_mut() {
            Some(block) => {
                block.color = color;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Occupied blocks in row-major order
    pub fn iter_occupied(&self) -> impl Iterator<Item = &Block> + '_ {
        self.cells.iter().filter_map(|cell| cell.as_ref())
    }

    pub fn occupied_count(&self) -> usize {
        self.iter_occupied().count()
    }

    /// Colors as rows (None = empty), for display and assertions
    pub fn color_rows(&self) -> Vec<Vec<Option<ColorId>>> {
        self.cells
            .chunks(self.columns as usize)
            .map(|row| row.iter().map(|cell| cell.map(|b| b.color)).collect())
            .collect()
    }

    /// Row-major colors (None = empty)
    pub fn colors(&self) -> impl Iterator<Item = Option<ColorId>> + '_ {
        self.cells.iter().map(|cell| cell.map(|b| b.color))
    }

    /// Start a new flood-fill pass and return its id.
    ///
    /// Ids are strictly increasing for the life of the grid.
    pub fn begin_new_pass(&mut self) -> u64 {
        self.pass_id += 1;
        self.pass_id
    }

    pub fn current_pass(&self) -> u64 {
        self.pass_id
    }

    pub fn mark_visited(&mut self, row: i32, col: i32, pass_id: u64) -> Result<()> {
        let idx = self.index(row, col)?;
        self.marks[idx] = pass_id;
        Ok(())
    }

    pub fn is_visited(&self, row: i32, col: i32, pass_id: u64) -> Result<bool> {
        let idx = self.index(row, col)?;
        Ok(self.marks[idx] == pass_id)
    }

    /// Check the position invariant: every block's stored (row, col) is its key.
    pub fn positions_consistent(&self) -> bool {
        self.cells.iter().enumerate().all(|(idx, cell)| match cell {
            Some(block) => {
                let row = (idx / self.columns as usize) as i32;
                let col = (idx % self.columns as usize) as i32;
                block.row == row && block.col == col
            }
            None => true,
        })
    }
}
