//! FileStore — one JSON file per category.
//!
//! Each category file holds an object mapping string-encoded ids to record
//! fields in display form, always written with grams as the storage unit:
//!
//! ```json
//! { "1": { "id": 1, "name": "Apple", "quantity": 1000.0, "unit": "g" } }
//! ```
//!
//! Every operation re-reads the file from disk and mutating operations write
//! the whole mapping back. There is no locking and no atomic rename, so
//! concurrent writers on the same category race last-writer-wins (an
//! accepted gap for this low-volume flat-file design).

use std::fs;
use std::path::PathBuf;

use serde_json::Map;
use tracing::debug;

use crate::category::Category;
use crate::produce::{Produce, ProduceFactory, ProduceFields};
use crate::store::{ProduceStore, StoreError};
use crate::unit::Unit;

/// File-backed produce store rooted at an explicitly supplied directory.
///
/// The directory is created lazily on first write; a category whose file
/// does not exist yet reads as an empty partition.
pub struct FileStore {
    storage_dir: PathBuf,
    factory: ProduceFactory,
}

impl FileStore {
    /// Create a store rooted at `storage_dir`. No default path; callers
    /// decide where data lives (see `Config`).
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            factory: ProduceFactory,
        }
    }

    fn file_path(&self, category: Category) -> PathBuf {
        self.storage_dir.join(format!("{}.json", category.as_str()))
    }

    /// Load a category file as (id, record) pairs in file order. Entries are
    /// rebuilt through the factory using their stored unit, so the canonical
    /// grams value round-trips.
    fn load(&self, category: Category) -> Result<Vec<(u64, Produce)>, StoreError> {
        let path = self.file_path(category);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents =
            fs::read_to_string(&path).map_err(|e| StoreError::Storage(e.to_string()))?;
        let entries: Map<String, serde_json::Value> =
            serde_json::from_str(&contents).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut records = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let id: u64 = key
                .parse()
                .map_err(|_| StoreError::Serde(format!("invalid record key: {}", key)))?;
            let fields: ProduceFields =
                serde_json::from_value(value).map_err(|e| StoreError::Serde(e.to_string()))?;
            let produce = self
                .factory
                .create_instance(category, fields)
                .map_err(|e| StoreError::Serde(e.to_string()))?;
            records.push((id, produce));
        }
        Ok(records)
    }

    /// Persist the whole partition, creating the storage directory if
    /// missing. Records are written in display form with grams.
    fn save(&self, category: Category, records: &[(u64, Produce)]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.storage_dir)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let mut entries = Map::new();
        for (id, produce) in records {
            let value = serde_json::to_value(produce.to_view(Unit::Gram))
                .map_err(|e| StoreError::Serde(e.to_string()))?;
            entries.insert(id.to_string(), value);
        }

        let contents = serde_json::to_string(&entries)
            .map_err(|e| StoreError::Serde(e.to_string()))?;
        fs::write(self.file_path(category), contents)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }
}

impl ProduceStore for FileStore {
    fn store(&self, category: Category, id: u64, produce: &Produce) -> Result<(), StoreError> {
        let mut records = self.load(category)?;
        match records.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = produce.clone(),
            None => records.push((id, produce.clone())),
        }
        self.save(category, &records)?;
        debug!(category = category.as_str(), id, "stored produce");
        Ok(())
    }

    fn find_all(&self, category: Category) -> Result<Vec<Produce>, StoreError> {
        Ok(self.load(category)?.into_iter().map(|(_, p)| p).collect())
    }

    fn find(&self, category: Category, id: u64) -> Result<Option<Produce>, StoreError> {
        Ok(self
            .load(category)?
            .into_iter()
            .find(|(key, _)| *key == id)
            .map(|(_, p)| p))
    }

    fn remove(&self, category: Category, id: u64) -> Result<bool, StoreError> {
        let mut records = self.load(category)?;
        let before = records.len();
        records.retain(|(key, _)| *key != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(category, &records)?;
        debug!(category = category.as_str(), id, "removed produce");
        Ok(true)
    }
}
