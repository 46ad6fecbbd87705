//! Board controller - ties the grid, flood fill, collapse and reshuffle together
//!
//! The controller owns the grid, the RNG and the derived tier map, and runs a
//! small state machine around each click:
//!
//! ```text
//! Idle --click(group >= 2)--> Resolving --grid settled--> Settling --animation_finished()--> Idle
//! ```
//!
//! All grid work for a click happens synchronously inside [`Board::click`].
//! `Settling` only waits for the presentation layer to finish replaying the
//! cycle report; clicks arriving before that are dropped, not queued.

use log::{debug, info, trace};

use crate::collapse::{collapse_and_refill, remove_group, SpawnOrigin};
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::group::{classify_tiers, find_group, TierMap};
use crate::grid::Grid;
use crate::moves::{find_any_move, has_any_move};
use crate::rng::{RandomSource, SimpleRng};
use crate::shuffle::smart_shuffle;
use crate::snapshot::BoardSnapshot;
use crate::types::{
    Block, BoardPhase, ClickOutcome, ColorId, CycleReport, Pos, ShuffleReport, Tier,
    MIN_GROUP_SIZE,
};

#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    grid: Grid,
    rng: SimpleRng,
    tiers: TierMap,
    phase: BoardPhase,
    /// Top visible row in grid units, reported by the presentation layer
    viewport_top: Option<i32>,
    /// Number of resolved clicks
    cycle: u32,
    /// Number of reshuffles, including one at start
    reshuffles: u32,
}

impl Board {
    /// Build a randomly colored, fully occupied board.
    ///
    /// A board that starts locked is reshuffled before it is returned.
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = SimpleRng::new(config.seed);
        let mut grid = Grid::new(config.rows, config.columns)?;
        for row in 0..config.rows {
            for col in 0..config.columns {
                let color = rng.next_below(config.color_count as u32) as ColorId;
                grid.spawn(row, col, color)?;
            }
        }
        Self::assemble(config, grid, rng)
    }

    /// Wrap a prepared grid. Its size must match `config`.
    pub fn from_grid(config: BoardConfig, grid: Grid) -> Result<Self> {
        config.validate()?;
        if grid.rows() != config.rows || grid.columns() != config.columns {
            return Err(BoardError::InvalidConfiguration(format!(
                "grid is {}x{} but config says {}x{}",
                grid.rows(),
                grid.columns(),
                config.rows,
                config.columns
            )));
        }
        if let Some(block) = grid.iter_occupied().find(|b| b.color >= config.color_count) {
            return Err(BoardError::InvalidConfiguration(format!(
                "block at ({}, {}) has color {} but color_count is {}",
                block.row, block.col, block.color, config.color_count
            )));
        }
        let rng = SimpleRng::new(config.seed);
        Self::assemble(config, grid, rng)
    }

    fn assemble(config: BoardConfig, mut grid: Grid, mut rng: SimpleRng) -> Result<Self> {
        let mut reshuffles = 0;
        if !has_any_move(&grid) && grid.occupied_count() >= 2 {
            let report = smart_shuffle(&mut grid, &mut rng)?;
            info!(
                "board {}x{} started locked, reshuffled: {:?}",
                config.rows, config.columns, report
            );
            reshuffles += 1;
        }
        let tiers = classify_tiers(&mut grid, &config.tiers)?;
        Ok(Self {
            config,
            grid,
            rng,
            tiers,
            phase: BoardPhase::Idle,
            viewport_top: None,
            cycle: 0,
            reshuffles,
        })
    }

    /// Throw the current board away and start a new one from `seed`.
    pub fn restart(&mut self, seed: u32) -> Result<()> {
        let viewport_top = self.viewport_top;
        *self = Self::new(self.config.with_seed(seed))?;
        self.viewport_top = viewport_top;
        Ok(())
    }

    /// Resolve a click at (row, col).
    ///
    /// Returns `Rejected` while a previous cycle is in flight and `NoMatch`
    /// for empty cells and single blocks; both leave the board untouched.
    /// Off-board coordinates fail with `OutOfBounds`.
    pub fn click(&mut self, row: i32, col: i32) -> Result<ClickOutcome> {
        if self.phase != BoardPhase::Idle {
            trace!("click ({}, {}) rejected while {}", row, col, self.phase.as_str());
            return Ok(ClickOutcome::Rejected);
        }

        let group = find_group(&mut self.grid, row, col)?;
        if group.len() < MIN_GROUP_SIZE {
            trace!("click ({}, {}) hit a group of {}", row, col, group.len());
            return Ok(ClickOutcome::NoMatch { size: group.len() });
        }

        self.phase = BoardPhase::Resolving;
        match self.resolve(Pos::new(row, col), &group) {
            Ok(report) => {
                self.phase = BoardPhase::Settling;
                Ok(ClickOutcome::Resolved(report))
            }
            Err(err) => {
                self.phase = BoardPhase::Idle;
                Err(err)
            }
        }
    }

    /// Run a full cycle on working copies, committing only on success.
    fn resolve(&mut self, seed: Pos, group: &[Block]) -> Result<CycleReport> {
        let mut grid = self.grid.clone();
        let mut rng = self.rng.clone();

        let removed = remove_group(&mut grid, group)?;
        let origin = SpawnOrigin::from_viewport(self.viewport_top, self.config.spawn_above_rows);
        let moves = collapse_and_refill(&mut grid, &mut rng, self.config.color_count, origin)?;

        let reshuffle: Option<ShuffleReport> = if has_any_move(&grid) {
            None
        } else {
            let report = smart_shuffle(&mut grid, &mut rng)?;
            info!("cycle {}: board locked, reshuffled: {:?}", self.cycle + 1, report);
            Some(report)
        };
        let tiers = classify_tiers(&mut grid, &self.config.tiers)?;

        self.grid = grid;
        self.rng = rng;
        self.tiers = tiers;
        self.cycle += 1;
        if reshuffle.is_some() {
            self.reshuffles += 1;
        }

        let report = CycleReport {
            cycle: self.cycle,
            seed,
            color: group[0].color,
            removed,
            moves,
            reshuffle,
        };
        debug!(
            "cycle {}: removed {} of color {} at ({}, {}), {} shifted, {} spawned",
            report.cycle,
            report.removed.len(),
            report.color,
            seed.row,
            seed.col,
            report.shifted().count(),
            report.spawned().count()
        );
        Ok(report)
    }

    /// Called by the animation collaborator once every move of the last cycle
    /// has finished playing. Returns true if the board became idle.
    pub fn animation_finished(&mut self) -> bool {
        if self.phase == BoardPhase::Settling {
            self.phase = BoardPhase::Idle;
            true
        } else {
            false
        }
    }

    /// Top visible row in grid units (negative when space above the board is
    /// visible). `None` falls back to the configured spawn offset.
    pub fn set_viewport_top(&mut self, top_row: Option<i32>) {
        self.viewport_top = top_row;
    }

    pub fn viewport_top(&self) -> Option<i32> {
        self.viewport_top
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn rows(&self) -> i32 {
        self.grid.rows()
    }

    pub fn columns(&self) -> i32 {
        self.grid.columns()
    }

    pub fn color_count(&self) -> ColorId {
        self.config.color_count
    }

    pub fn seed(&self) -> u32 {
        self.config.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tiers(&self) -> &TierMap {
        &self.tiers
    }

    pub fn tier_at(&self, row: i32, col: i32) -> Result<Option<Tier>> {
        self.grid.get(row, col)?;
        Ok(self.tiers.tier(row, col))
    }

    pub fn color_at(&self, row: i32, col: i32) -> Result<Option<ColorId>> {
        self.grid.color_at(row, col)
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != BoardPhase::Idle
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    pub fn has_any_move(&self) -> bool {
        has_any_move(&self.grid)
    }

    /// Some removable pair, for hints and automated play
    pub fn hint(&self) -> Option<(Pos, Pos)> {
        find_any_move(&self.grid)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collapse::is_compacted;

    fn config(rows: i32, columns: i32, colors: u8) -> BoardConfig {
        BoardConfig::default().with_size(rows, columns).with_colors(colors)
    }

    #[test]
    fn test_new_board_is_full_and_playable() {
        let board = Board::new(config(8, 6, 4).with_seed(42)).unwrap();
        assert_eq!(board.grid().occupied_count(), 48);
        assert!(board.has_any_move());
        assert_eq!(board.phase(), BoardPhase::Idle);
        assert!(board.grid().iter_occupied().all(|b| b.color < 4));
    }

    #[test]
    fn test_new_board_rejects_bad_config() {
        assert!(matches!(
            Board::new(config(0, 6, 4)),
            Err(BoardError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Board::new(config(4, 4, 0)),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Board::new(config(6, 6, 5).with_seed(9)).unwrap();
        let b = Board::new(config(6, 6, 5).with_seed(9)).unwrap();
        assert_eq!(a.grid().color_rows(), b.grid().color_rows());
    }

    #[test]
    fn test_click_cycle_walks_state_machine() {
        let grid = Grid::from_color_rows(&[[0, 0, 1], [0, 1, 1], [2, 2, 2]]).unwrap();
        let mut board = Board::from_grid(config(3, 3, 3), grid).unwrap();

        let outcome = board.click(0, 0).unwrap();
        let ClickOutcome::Resolved(report) = outcome else {
            panic!("expected a resolved click, got {:?}", outcome);
        };
        assert_eq!(report.cycle, 1);
        assert_eq!(report.removed.len(), 3);
        assert_eq!(board.phase(), BoardPhase::Settling);
        assert!(is_compacted(board.grid()));

        assert_eq!(board.click(2, 2).unwrap(), ClickOutcome::Rejected);
        assert!(board.animation_finished());
        assert!(!board.animation_finished());
        assert_eq!(board.phase(), BoardPhase::Idle);
    }

    #[test]
    fn test_failed_cycle_leaves_board_unchanged() {
        let grid = Grid::from_color_rows(&[[0, 0], [1, 2]]).unwrap();
        let mut board = Board::from_grid(config(2, 2, 3), grid).unwrap();
        let before = board.grid().clone();

        // A group whose stored coordinates point off the board cannot be removed.
        let bogus = [Block {
            id: crate::types::BlockId(99),
            color: 0,
            row: 5,
            col: 5,
        }];
        board.phase = BoardPhase::Resolving;
        assert!(board.resolve(Pos::new(0, 0), &bogus).is_err());
        assert_eq!(board.grid(), &before);
        assert_eq!(board.cycle(), 0);
    }

    #[test]
    fn test_from_grid_checks_colors_and_size() {
        let grid = Grid::from_color_rows(&[[0, 3]]).unwrap();
        assert!(Board::from_grid(config(1, 2, 3), grid.clone()).is_err());
        assert!(Board::from_grid(config(2, 2, 4), grid).is_err());
    }

    #[test]
    fn test_restart_builds_a_fresh_board() {
        let mut board = Board::new(config(5, 5, 4).with_seed(1)).unwrap();
        board.set_viewport_top(Some(-3));
        board.click(0, 0).unwrap();
        board.restart(2).unwrap();

        assert_eq!(board.seed(), 2);
        assert_eq!(board.cycle(), 0);
        assert_eq!(board.phase(), BoardPhase::Idle);
        assert_eq!(board.viewport_top(), Some(-3));
        let fresh = Board::new(config(5, 5, 4).with_seed(2)).unwrap();
        assert_eq!(board.grid().color_rows(), fresh.grid().color_rows());
    }
}
