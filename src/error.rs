//! Error types for the Hexapawn crate

use thiserror::Error;

use crate::hexapawn::{Move, Side};

/// Main error type for the Hexapawn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move {mv} in position '{state}'")]
    IllegalMove { mv: Move, state: String },

    #[error("game already over")]
    GameOver,

    #[error("the game is still in progress")]
    GameNotFinished,

    #[error("no agent attached for the {side} side")]
    NoAgentForSide { side: Side },

    #[error("no legal moves available in state '{key}'")]
    NoLegalMoves { key: String },

    #[error("coordinate ({row}, {col}) is off the board (must be 0-2)")]
    InvalidCoord { row: usize, col: usize },

    #[error("invalid square '{input}' (expected a column a-c followed by a row 1-3)")]
    ParseCoord { input: String },

    #[error("invalid move '{input}' (expected e.g. 'a1-a2' or 'a2xb3')")]
    ParseMove { input: String },

    #[error("invalid board '{input}': {reason}")]
    ParseBoard { input: String, reason: String },

    #[error("invalid side '{input}' (expected 'first' or 'second')")]
    ParseSide { input: String },

    #[error("invalid reinforcement schedule '{input}': {reason}")]
    ParseReinforcement { input: String, reason: String },

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

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

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
