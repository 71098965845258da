//! Error types for the dropfour crate

use thiserror::Error;

/// Main error type for the dropfour crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("board size {rows}x{cols} is too small (both dimensions must be at least 5)")]
    InvalidBoardSize { rows: usize, cols: usize },

    #[error("move ({row}, {col}) is out of bounds for a {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("illegal move ({row}, {col}): the cell is occupied or not yet reachable")]
    IllegalMove { row: usize, col: usize },

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("move ({row}, {col}) is not an action of this position")]
    UnknownAction { row: usize, col: usize },

    #[error("a child for move ({row}, {col}) already exists")]
    DuplicateChild { row: usize, col: usize },

    #[error("update path references a missing tree edge for move ({row}, {col}) at index {index}")]
    MissingPathNode {
        row: usize,
        col: usize,
        index: usize,
    },

    #[error("move sequence is empty")]
    EmptyMoveSequence,

    #[error("cursor detached from the tree while training")]
    DetachedCursor,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("unknown opponent '{input}'. Expected one of: {expected}")]
    ParseOpponent { input: String, expected: String },

    #[error("unknown seat '{input}' (expected '1' or '2')")]
    ParseSeat { input: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
