use thiserror::Error;

/// Errors raised while building or resizing a board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("board rows must all have {expected} cells, row {row} has {found}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("board size {requested} exceeds the maximum of {max}")]
    SizeTooLarge { requested: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
