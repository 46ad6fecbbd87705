//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond small helpers, making them
//! usable in any context (simulation core, terminal rendering, JSON reports).
//!
//! # Coordinates
//!
//! Positions are `(row, col)` pairs. Row 0 is the top of the board, rows grow
//! downward. Coordinates are signed so that neighbor lookups and off-board spawn
//! positions (negative rows above the board) can be expressed directly.
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 10 | Rows of a default board |
//! | `DEFAULT_COLUMNS` | 10 | Columns of a default board |
//! | `DEFAULT_COLOR_COUNT` | 5 | Distinct block colors |
//! | `DEFAULT_SPAWN_ABOVE_ROWS` | 2 | Spawn offset when no viewport is known |
//! | `MIN_GROUP_SIZE` | 2 | Smallest removable group |
//! | `TICK_MS` | 16 | Fixed frame interval (~60 FPS) |
//! | `MIN_DROP_MS` / `MAX_DROP_MS` | 150 / 450 | Clamp for a single block's drop animation |
//! | `COLUMN_STAGGER_MS` | 20 | Delay between the start of consecutive columns |
//! | `SPAWN_POP_MS` | 80 | Duration of the "pop" of a newly spawned block |
//!
//! # Examples
//!
//! ```
//! use tui_blast_types::{Pos, Tier, TierThresholds};
//!
//! let pos = Pos::new(2, 3);
//! assert_eq!(pos.up(), Pos::new(1, 3));
//!
//! let tiers = TierThresholds::default();
//! assert_eq!(tiers.tier_for(2), Tier::Default);
//! assert_eq!(tiers.tier_for(10), Tier::Tier3);
//! ```

use serde::{Deserialize, Serialize};

/// Rows of a default board
pub const DEFAULT_ROWS: i32 = 10;

/// Columns of a default board
pub const DEFAULT_COLUMNS: i32 = 10;

/// Number of distinct colors on a default board
pub const DEFAULT_COLOR_COUNT: u8 = 5;

/// Rows above row 0 where new blocks appear when no viewport top is known
pub const DEFAULT_SPAWN_ABOVE_ROWS: i32 = 2;

/// Rows above the viewport top where new blocks appear
pub const SPAWN_ABOVE_VIEWPORT_ROWS: i32 = 2;

/// Largest accepted value for rows or columns
pub const MAX_DIMENSION: i32 = 1024;

/// Smallest group a click removes
pub const MIN_GROUP_SIZE: usize = 2;

/// Default tier thresholds (group size > A, > B, > C)
pub const DEFAULT_TIER_A: u32 = 4;
pub const DEFAULT_TIER_B: u32 = 7;
pub const DEFAULT_TIER_C: u32 = 9;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop animation speed in rows per second
pub const DROP_SPEED_ROWS_PER_SEC: f32 = 12.0;

/// Shortest drop animation
pub const MIN_DROP_MS: u32 = 150;

/// Longest drop animation
pub const MAX_DROP_MS: u32 = 450;

/// Delay between the start of consecutive column animations
pub const COLUMN_STAGGER_MS: u32 = 20;

/// Scale-in duration for a newly spawned block
pub const SPAWN_POP_MS: u32 = 80;

/// Block color index, always in `[0, color_count)`
pub type ColorId = u8;

/// Identity of a block entity, stable while the block lives on the board.
///
/// New ids are handed out for every spawned block so the presentation layer
/// can follow a block from its spawn position to its resting cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u32);

/// Grid coordinate, `(row, col)` with row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn up(self) -> Self {
        Self::new(self.row - 1, self.col)
    }

    pub const fn down(self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    pub const fn left(self) -> Self {
        Self::new(self.row, self.col - 1)
    }

    pub const fn right(self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    /// The four axis-aligned neighbors: up, down, left, right.
    ///
    /// Neighbors may lie outside the board; callers filter them.
    pub const fn neighbors(self) -> [Pos; 4] {
        [self.up(), self.down(), self.left(), self.right()]
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// A colored block occupying a grid cell.
///
/// `row`/`col` always equal the key of the cell that holds the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub color: ColorId,
    pub row: i32,
    pub col: i32,
}

impl Block {
    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }
}

/// Board cell (None = empty)
pub type Cell = Option<Block>;

/// Cosmetic classification of a block by the size of its current group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Default,
    Tier1,
    Tier2,
    Tier3,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Default => "default",
            Tier::Tier1 => "tier1",
            Tier::Tier2 => "tier2",
            Tier::Tier3 => "tier3",
        }
    }
}

/// Group-size thresholds `A < B < C` selecting the tier visual.
///
/// A group larger than C uses tier 3, larger than B tier 2, larger than A
/// tier 1, anything else the default visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierThresholds {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl TierThresholds {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// Strictly increasing thresholds are required
    pub fn is_ordered(&self) -> bool {
        self.a < self.b && self.b < self.c
    }

    pub fn tier_for(&self, group_size: usize) -> Tier {
        let size = group_size as u64;
        if size > self.c as u64 {
            Tier::Tier3
        } else if size > self.b as u64 {
            Tier::Tier2
        } else if size > self.a as u64 {
            Tier::Tier1
        } else {
            Tier::Default
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self::new(DEFAULT_TIER_A, DEFAULT_TIER_B, DEFAULT_TIER_C)
    }
}

/// One block movement produced by a collapse/refill pass.
///
/// For surviving blocks `from` is their old cell. For new blocks (`is_new`)
/// `from` is the notional off-board spawn position above the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockMove {
    pub block: BlockId,
    pub color: ColorId,
    pub from: Pos,
    pub to: Pos,
    pub is_new: bool,
}

impl BlockMove {
    /// Vertical distance travelled, in rows
    pub fn distance(&self) -> u32 {
        (self.to.row - self.from.row).unsigned_abs()
    }
}

/// Outcome of a reshuffle of a locked board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShuffleReport {
    /// Forced adjacent pair, if one could be chosen
    pub pair: Option<(Pos, Pos)>,
    pub forced_color: Option<ColorId>,
    /// False only when every color on the board was unique and the pair had to be overwritten
    pub multiset_preserved: bool,
}

impl ShuffleReport {
    pub fn skipped() -> Self {
        Self {
            pair: None,
            forced_color: None,
            multiset_preserved: true,
        }
    }
}

/// Everything a single resolved click changed, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Monotonic cycle counter (1 for the first resolved click)
    pub cycle: u32,
    pub seed: Pos,
    pub color: ColorId,
    /// Blocks removed by the click, in group discovery order
    pub removed: Vec<Block>,
    /// Surviving-block moves and new-block spawns, column by column
    pub moves: Vec<BlockMove>,
    /// Present when the board locked after refill and had to be reshuffled
    pub reshuffle: Option<ShuffleReport>,
}

impl CycleReport {
    pub fn spawned(&self) -> impl Iterator<Item = &BlockMove> {
        self.moves.iter().filter(|m| m.is_new)
    }

    pub fn shifted(&self) -> impl Iterator<Item = &BlockMove> {
        self.moves.iter().filter(|m| !m.is_new)
    }
}

/// Board controller state machine.
///
/// `Idle → Resolving → Settling → Idle`. Clicks are accepted only while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardPhase {
    #[default]
    Idle,
    /// Grid mutation of a click in progress
    Resolving,
    /// Grid settled; waiting for the animation collaborator to finish
    Settling,
}

impl BoardPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPhase::Idle => "idle",
            BoardPhase::Resolving => "resolving",
            BoardPhase::Settling => "settling",
        }
    }
}

/// Result of a click on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A previous cycle is still resolving or settling; the click was dropped
    Rejected,
    /// Empty cell (`size == 0`) or isolated block (`size == 1`); nothing changed
    NoMatch { size: usize },
    Resolved(CycleReport),
}

/// Player intents produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Select { row: i32, col: i32 },
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds_are_strictly_greater_than() {
        let t = TierThresholds::new(4, 7, 9);
        assert_eq!(t.tier_for(0), Tier::Default);
        assert_eq!(t.tier_for(4), Tier::Default);
        assert_eq!(t.tier_for(5), Tier::Tier1);
        assert_eq!(t.tier_for(7), Tier::Tier1);
        assert_eq!(t.tier_for(8), Tier::Tier2);
        assert_eq!(t.tier_for(9), Tier::Tier2);
        assert_eq!(t.tier_for(10), Tier::Tier3);
    }

    #[test]
    fn tier_thresholds_ordering() {
        assert!(TierThresholds::default().is_ordered());
        assert!(!TierThresholds::new(3, 3, 5).is_ordered());
        assert!(!TierThresholds::new(5, 4, 9).is_ordered());
    }

    #[test]
    fn pos_neighbors_order() {
        let p = Pos::new(1, 1);
        assert_eq!(
            p.neighbors(),
            [Pos::new(0, 1), Pos::new(2, 1), Pos::new(1, 0), Pos::new(1, 2)]
        );
    }

    #[test]
    fn block_move_distance() {
        let m = BlockMove {
            block: BlockId(1),
            color: 0,
            from: Pos::new(-2, 3),
            to: Pos::new(1, 3),
            is_new: true,
        };
        assert_eq!(m.distance(), 3);
    }

    #[test]
    fn phase_and_tier_serialize_lowercase() {
        assert_eq!(BoardPhase::Settling.as_str(), "settling");
        assert_eq!(Tier::Tier2.as_str(), "tier2");
    }
}
