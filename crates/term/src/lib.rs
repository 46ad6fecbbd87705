//! Terminal presentation for the blast board.
//!
//! The core simulation never waits on the screen. This crate is the other
//! half of that contract: it renders board snapshots into a framebuffer,
//! replays each click's [`CycleReport`](tui_blast_types::CycleReport) as
//! falling blocks, and tells the runner when the replay is over so the board
//! can accept the next click.
//!
//! - [`fb`]: styled character framebuffer
//! - [`board_view`]: snapshot + playback → framebuffer, plus mouse hit-testing
//! - [`playback`]: time-based replay of block moves and spawns
//! - [`renderer`]: diffing crossterm backend

pub mod board_view;
pub mod fb;
pub mod playback;
pub mod renderer;

pub use tui_blast_core as core;
pub use tui_blast_types as types;

pub use board_view::{BoardLayout, BoardView, Viewport};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use playback::{Playback, Sprite};
pub use renderer::{encode_frame_into, TerminalRenderer};
