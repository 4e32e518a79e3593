//! Error type shared by every dataset operation.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// A raw record could not be read as a `(user_turn, system_turn)` pair.
    #[error("invalid turn #{index} in split '{split}': {source}")]
    InvalidTurn {
        split: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Requested split name is not one of train/valid/test/all.
    #[error("unknown split '{0}'; expected one of train|valid|test|all")]
    UnknownSplit(String),

    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("invalid split ratios: valid={valid}, test={test} (each must be in [0, 1] and sum to at most 1)")]
    InvalidRatio { valid: f64, test: f64 },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset document: {0}")]
    Document(#[source] serde_json::Error),

    #[error("malformed dataset JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}
