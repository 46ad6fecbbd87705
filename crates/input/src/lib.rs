//! Terminal input module (board-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`KeyCommand`]s and
//! [`crate::types::BoardAction`]s, and keeps a keyboard cursor so the board
//! can be played without a mouse.

pub mod cursor;
pub mod map;

pub use tui_blast_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, handle_mouse_event, should_quit, KeyCommand};
