//! Produce storage — the store trait plus file-backed and in-memory
//! implementations.
//!
//! Stores are keyed by (category, id). Each category is an independent
//! partition; the file-backed store maps a partition to one JSON file.

mod file;
mod memory;

use std::fmt;

use crate::category::Category;
use crate::produce::Produce;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Abstract CRUD storage for produce records.
pub trait ProduceStore: Send + Sync {
    /// Upsert (replaces any existing record at that id unconditionally).
    fn store(&self, category: Category, id: u64, produce: &Produce) -> Result<(), StoreError>;

    /// All records for a category, in persisted-mapping order.
    fn find_all(&self, category: Category) -> Result<Vec<Produce>, StoreError>;

    /// Point lookup. Returns `Ok(None)` when absent.
    fn find(&self, category: Category, id: u64) -> Result<Option<Produce>, StoreError>;

    /// Delete by id. Returns whether a deletion occurred; `false` when the
    /// id is absent or the partition does not exist yet.
    fn remove(&self, category: Category, id: u64) -> Result<bool, StoreError>;
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Storage-level failure (filesystem I/O, poisoned lock).
    Storage(String),
    /// Record encoding or decoding failed.
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Storage(msg) => write!(f, "storage error: {}", msg),
            StoreError::Serde(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
