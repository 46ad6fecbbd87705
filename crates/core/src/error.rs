use thiserror::Error;

/// Errors raised by the grid simulation.
///
/// Neither variant is recoverable mid-cycle: configuration errors stop a board
/// from being built, bounds errors abort the operation that hit them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: i32,
        col: i32,
        rows: i32,
        columns: i32,
    },

    #[error("invalid board configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
