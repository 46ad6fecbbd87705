//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the grid simulation of a tap-to-blast tile board:
//! clicking a block removes its same-colored connected group (two or more
//! blocks), the remaining blocks fall, new blocks refill the columns from
//! above, and a board left without any move is reshuffled.
//! It has **no dependencies** on UI, terminal, or I/O, making it:
//!
//! - **Deterministic**: Same seed and same clicks produce identical boards
//! - **Testable**: Every component works on an explicitly passed [`Grid`]
//! - **Portable**: Runs headless, in the terminal, or behind any renderer
//!
//! # Module Structure
//!
//! - [`grid`]: cell storage and flood-fill visitation marks
//! - [`group`]: BFS group finder and whole-board tier classification
//! - [`collapse`]: column compaction and refill, producing a move report
//! - [`moves`]: move availability scan (locked board detection)
//! - [`shuffle`]: color-preserving reshuffle with a forced matching pair
//! - [`board`]: the controller and its `Idle → Resolving → Settling` cycle
//! - [`config`]: validated board configuration
//! - [`rng`]: seeded randomness behind the [`RandomSource`] trait
//! - [`snapshot`]: serializable read-only board view
//!
//! # Example
//!
//! ```
//! use tui_blast_core::{Board, BoardConfig, Grid};
//! use tui_blast_types::ClickOutcome;
//!
//! let grid = Grid::from_color_rows(&[[0, 0, 1], [0, 1, 1], [2, 2, 2]]).unwrap();
//! let config = BoardConfig::default().with_size(3, 3).with_colors(3);
//! let mut board = Board::from_grid(config, grid).unwrap();
//!
//! match board.click(0, 0).unwrap() {
//!     ClickOutcome::Resolved(report) => assert_eq!(report.removed.len(), 3),
//!     other => panic!("unexpected {:?}", other),
//! }
//!
//! // The animation layer replays the report, then releases the board.
//! assert!(board.is_busy());
//! board.animation_finished();
//! assert!(!board.is_busy());
//! ```

pub mod board;
pub mod collapse;
pub mod config;
pub mod error;
pub mod grid;
pub mod group;
pub mod moves;
pub mod rng;
pub mod shuffle;
pub mod snapshot;

pub use tui_blast_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collapse::{collapse_and_refill, is_compacted, remove_group, SpawnOrigin};
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use grid::Grid;
pub use group::{classify_tiers, find_group, TierMap};
pub use moves::{find_any_move, has_any_move};
pub use rng::{shuffle as shuffle_slice, RandomSource, SimpleRng};
pub use shuffle::{forced_pair, smart_shuffle};
pub use snapshot::{board_hash, BoardSnapshot};
