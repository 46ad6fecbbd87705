use serde::Serialize;

use crate::board::Board;
use crate::types::{BoardPhase, ColorId, Tier};

/// Read-only copy of everything a renderer or observer needs from a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub rows: i32,
    pub columns: i32,
    pub color_count: ColorId,
    /// Row-major colors (None = empty)
    pub colors: Vec<Option<ColorId>>,
    /// Row-major tiers (None = empty)
    pub tiers: Vec<Option<Tier>>,
    pub phase: BoardPhase,
    pub cycle: u32,
    pub seed: u32,
    pub board_hash: u64,
}

impl BoardSnapshot {
    pub fn capture(board: &Board) -> Self {
        let colors: Vec<Option<ColorId>> = board.grid().colors().collect();
        let board_hash = board_hash(&colors);
        Self {
            rows: board.rows(),
            columns: board.columns(),
            color_count: board.color_count(),
            colors,
            tiers: board.tiers().tiers().collect(),
            phase: board.phase(),
            cycle: board.cycle(),
            seed: board.seed(),
            board_hash,
        }
    }

    pub fn color(&self, row: i32, col: i32) -> Option<ColorId> {
        self.index(row, col).and_then(|i| self.colors[i])
    }

    pub fn tier(&self, row: i32, col: i32) -> Option<Tier> {
        self.index(row, col).and_then(|i| self.tiers[i])
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= self.rows || col < 0 || col >= self.columns {
            return None;
        }
        Some((row as usize) * (self.columns as usize) + col as usize)
    }

    pub fn playable(&self) -> bool {
        self.phase == BoardPhase::Idle
    }
}

/// FNV-1a 64 over the row-major colors, 0xFF standing for an empty cell.
pub fn board_hash(colors: &[Option<ColorId>]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for color in colors {
        h ^= color.unwrap_or(0xFF) as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    #[test]
    fn snapshot_matches_board() {
        let board = Board::new(BoardConfig::default().with_size(4, 3).with_seed(8)).unwrap();
        let snap = board.snapshot();

        assert_eq!(snap.colors.len(), 12);
        assert_eq!(snap.color(3, 2), board.color_at(3, 2).unwrap());
        assert_eq!(snap.color(4, 0), None);
        assert_eq!(snap.tier(0, 0), board.tier_at(0, 0).unwrap());
        assert_eq!(snap.board_hash, board_hash(&snap.colors));
        assert!(snap.playable());
    }

    #[test]
    fn hash_distinguishes_empty_from_color() {
        assert_ne!(board_hash(&[Some(0), None]), board_hash(&[Some(0), Some(0)]));
        assert_ne!(board_hash(&[Some(1), Some(2)]), board_hash(&[Some(2), Some(1)]));
    }
}
