//! Storage error types.

use thiserror::Error;
use timeline_core::ItemSetError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid item set: {0}")]
    ItemSet(#[from] ItemSetError),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
