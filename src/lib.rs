//! TUI Blast (workspace facade crate).
//!
//! The simulation, presentation and input live in dedicated crates under
//! `crates/`; this package re-exports them as `tui_blast::{core,term,input,types}`
//! and hosts the command-line plumbing shared by the interactive runner and
//! the headless simulator.

pub mod cli;
pub mod simulate;

pub use tui_blast_core as core;
pub use tui_blast_input as input;
pub use tui_blast_term as term;
pub use tui_blast_types as types;
