//! Board configuration.
//!
//! Loaded from JSON by the binary (every field optional) and validated once,
//! before a board is built, so a bad configuration never reaches gameplay.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::types::{
    TierThresholds, DEFAULT_COLOR_COUNT, DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_SPAWN_ABOVE_ROWS,
    MAX_DIMENSION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: i32,
    pub columns: i32,
    pub color_count: u8,
    pub seed: u32,
    pub tiers: TierThresholds,
    /// Spawn offset above row 0, used while no viewport top is known
    pub spawn_above_rows: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            color_count: DEFAULT_COLOR_COUNT,
            seed: 1,
            tiers: TierThresholds::default(),
            spawn_above_rows: DEFAULT_SPAWN_ABOVE_ROWS,
        }
    }
}

impl BoardConfig {
    pub fn with_size(mut self, rows: i32, columns: i32) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_colors(mut self, color_count: u8) -> Self {
        self.color_count = color_count;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tiers(mut self, tiers: TierThresholds) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.rows, self.columns)?;
        if self.color_count == 0 {
            return Err(BoardError::InvalidConfiguration(
                "color_count must be at least 1".into(),
            ));
        }
        if !self.tiers.is_ordered() {
            return Err(BoardError::InvalidConfiguration(format!(
                "tier thresholds must satisfy a < b < c, got {} / {} / {}",
                self.tiers.a, self.tiers.b, self.tiers.c
            )));
        }
        if self.spawn_above_rows < 1 {
            return Err(BoardError::InvalidConfiguration(format!(
                "spawn_above_rows must be positive, got {}",
                self.spawn_above_rows
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_dimensions(rows: i32, columns: i32) -> Result<()> {
    if rows <= 0 || columns <= 0 {
        return Err(BoardError::InvalidConfiguration(format!(
            "rows and columns must be positive, got {}x{}",
            rows, columns
        )));
    }
    if rows > MAX_DIMENSION || columns > MAX_DIMENSION {
        return Err(BoardError::InvalidConfiguration(format!(
            "rows and columns must not exceed {}, got {}x{}",
            MAX_DIMENSION, rows, columns
        )));
    }
    Ok(())
}
