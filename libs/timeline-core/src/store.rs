//! Statistics store seam.
//!
//! The engine never owns review records. It borrows a [`StatStore`] for the
//! duration of one call and writes every change straight back through it.

use crate::types::{ReviewRecord, StatMap};
use std::convert::Infallible;

/// Keyed storage of review records.
pub trait StatStore {
    /// Error raised by the persistence backend.
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, id: &str) -> Option<ReviewRecord>;

    /// Store `record` under `id` and persist it.
    fn put(&mut self, id: &str, record: ReviewRecord) -> Result<(), Self::Error>;

    fn all(&self) -> &StatMap;
}

/// Store that lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: StatMap,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: StatMap) -> Self {
        Self { records }
    }

    pub fn into_records(self) -> StatMap {
        self.records
    }
}

impl StatStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, id: &str) -> Option<ReviewRecord> {
        self.records.get(id).cloned()
    }

    fn put(&mut self, id: &str, record: ReviewRecord) -> Result<(), Self::Error> {
        self.records.insert(id.to_string(), record);
        Ok(())
    }

    fn all(&self) -> &StatMap {
        &self.records
    }
}

impl<S: StatStore + ?Sized> StatStore for &mut S {
    type Error = S::Error;

    fn get(&self, id: &str) -> Option<ReviewRecord> {
        (**self).get(id)
    }

    fn put(&mut self, id: &str, record: ReviewRecord) -> Result<(), Self::Error> {
        (**self).put(id, record)
    }

    fn all(&self) -> &StatMap {
        (**self).all()
    }
}
