//! Error types for timeline-core.

use thiserror::Error;

/// Result type alias using ItemSetError.
pub type Result<T> = std::result::Result<T, ItemSetError>;

/// Errors that can occur while reading an item-set document.
#[derive(Debug, Error)]
pub enum ItemSetError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("item set must be a JSON object mapping items to answers")]
    NotAnObject,

    #[error("answer for {item:?} is not a string")]
    NonStringAnswer { item: String },

    #[error("blank item identifier at position {position}")]
    BlankIdentifier { position: usize },
}

/// Errors raised when building a performance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("performance score {0} is outside 0..=5")]
    OutOfRange(u8),
}
