//! Category collections — filtering and search over one storage partition.
//!
//! A collection is a stateless view: it owns no records, only its category
//! and a handle to the shared store. Results leave the collection in display
//! form; everything below it works on canonical grams.

use std::sync::Arc;

use crate::category::Category;
use crate::filters::{apply_filters, Filters};
use crate::produce::{Produce, ProduceView};
use crate::store::{ProduceStore, StoreError};
use crate::unit::Unit;

/// The collection responsible for one produce category.
pub struct Collection {
    category: Category,
    store: Arc<dyn ProduceStore>,
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl Collection {
    pub fn new(category: Category, store: Arc<dyn ProduceStore>) -> Self {
        Self { category, store }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Whether this collection handles the given category.
    pub fn supports(&self, category: Category) -> bool {
        self.category == category
    }

    pub fn add(&self, id: u64, produce: &Produce) -> Result<(), StoreError> {
        self.store.store(self.category, id, produce)
    }

    pub fn remove(&self, id: u64) -> Result<bool, StoreError> {
        self.store.remove(self.category, id)
    }

    pub fn get(&self, id: u64) -> Result<Option<Produce>, StoreError> {
        self.store.find(self.category, id)
    }

    /// List the category in display form, narrowed by the filter set. Scan
    /// order is preserved; the display unit comes from the filters (grams
    /// when absent or unresolvable).
    pub fn list(&self, filters: &Filters) -> Result<Vec<ProduceView>, StoreError> {
        let produces = self.store.find_all(self.category)?;
        let unit = filters.display_unit();
        Ok(apply_filters(produces, filters)
            .iter()
            .map(|p| p.to_view(unit))
            .collect())
    }

    /// Case-insensitive substring search on names. An empty query matches
    /// everything.
    pub fn search(&self, query: &str, unit: Unit) -> Result<Vec<ProduceView>, StoreError> {
        let produces = self.store.find_all(self.category)?;
        let query = query.to_lowercase();
        Ok(produces
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&query))
            .map(|p| p.to_view(unit))
            .collect())
    }
}
