//! Error types for the noughts crate

use thiserror::Error;

use crate::board::Player;

/// Main error type for the noughts crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("inconsistent mark counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InconsistentMarkCounts { x_count: usize, o_count: usize },

    #[error("invalid move: cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("invalid move: ({row}, {col}) is outside the 3x3 board")]
    CellOutOfBounds { row: usize, col: usize },

    #[error("it is not {player}'s turn to move")]
    OutOfTurn { player: Player },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("malformed coordinate '{input}' (expected format: row,col e.g. 1,1)")]
    MalformedCoordinate { input: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
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
