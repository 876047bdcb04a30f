//! MemoryStore — HashMap-backed produce store for tests and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::category::Category;
use crate::produce::Produce;
use crate::store::{ProduceStore, StoreError};

/// In-memory produce store. Clone-friendly via `Arc`; per-category insertion
/// order is preserved to match the file-backed scan order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    storage: Arc<RwLock<HashMap<Category, Vec<(u64, Produce)>>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProduceStore for MemoryStore {
    fn store(&self, category: Category, id: u64, produce: &Produce) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let records = storage.entry(category).or_default();
        match records.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = produce.clone(),
            None => records.push((id, produce.clone())),
        }
        Ok(())
    }

    fn find_all(&self, category: Category) -> Result<Vec<Produce>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        Ok(storage
            .get(&category)
            .map(|records| records.iter().map(|(_, p)| p.clone()).collect())
            .unwrap_or_default())
    }

    fn find(&self, category: Category, id: u64) -> Result<Option<Produce>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        Ok(storage.get(&category).and_then(|records| {
            records
                .iter()
                .find(|(key, _)| *key == id)
                .map(|(_, p)| p.clone())
        }))
    }

    fn remove(&self, category: Category, id: u64) -> Result<bool, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let Some(records) = storage.get_mut(&category) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|(key, _)| *key != id);
        Ok(records.len() != before)
    }
}
