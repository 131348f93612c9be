//! Error types for multiline-core.

use thiserror::Error;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised when a store command addresses a position that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("set index {index} out of range (len {len})")]
    SetOutOfRange { index: usize, len: usize },

    #[error("flashcard index {index} out of range in set {set_index} (len {len})")]
    FlashcardOutOfRange {
        set_index: usize,
        index: usize,
        len: usize,
    },
}

/// Errors that can occur while importing or exporting the store tree.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
