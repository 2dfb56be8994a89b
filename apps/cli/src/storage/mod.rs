//! File-backed storage for item sets and review statistics.

pub mod error;
pub mod items;
pub mod stats;

pub use error::StorageError;
pub use items::{sample_items, ItemFile};
pub use stats::JsonStatStore;

pub type Result<T> = std::result::Result<T, StorageError>;
