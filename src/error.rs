//! Error types for the gridlearn crate

use thiserror::Error;

/// Main error type for the gridlearn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("environment error: {message}")]
    Environment { message: String },

    #[error("environment produced no observation within {waited_ms} ms")]
    EnvironmentTimeout { waited_ms: u64 },

    #[error("no path from cell {origin} to cell {destination}")]
    UnreachableDestination { origin: usize, destination: usize },

    #[error("grid has no {marker} marker")]
    MissingMarker { marker: &'static str },

    #[error("invalid grid shape: {message}")]
    InvalidGridShape { message: String },

    #[error("invalid character '{character}' at row {row}, column {column} of grid map")]
    InvalidMapCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("cell index {index} is outside a grid of {len} cells")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cells {from} and {to} are not adjacent")]
    NonAdjacentStep { from: usize, to: usize },

    #[error("grid has {grid_cells} cells but the action-value table covers {table_states} states")]
    GridSizeMismatch {
        grid_cells: usize,
        table_states: usize,
    },

    #[error("episode {episode} is not accepting moves")]
    EpisodeNotStepping { episode: usize },

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

impl Error {
    /// Wrap a failure reported by the external environment.
    pub fn environment(message: impl Into<String>) -> Self {
        Error::Environment {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
