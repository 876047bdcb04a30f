//! Collection resolution.
//!
//! Collections register at wiring time and are matched with a `supports`
//! capability check, first match wins. With exactly one collection per
//! category the miss path is unreachable, but it stays a real runtime error
//! rather than an assumption about wiring.

use crate::category::Category;
use crate::collection::Collection;
use crate::error::ServiceError;

/// Resolves a category to the collection that claims it.
pub struct CollectionResolver {
    collections: Vec<Collection>,
}

impl CollectionResolver {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self { collections }
    }

    /// The first registered collection supporting `category`, or
    /// [`ServiceError::NoCollection`] if none does.
    pub fn resolve(&self, category: Category) -> Result<&Collection, ServiceError> {
        self.collections
            .iter()
            .find(|c| c.supports(category))
            .ok_or(ServiceError::NoCollection)
    }
}
