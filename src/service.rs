//! ProduceService — transport-independent add/remove/list/search use cases.
//!
//! Orchestrates the resolver and factory; all operations are stateless
//! request/response, the only persistent state being the category files
//! behind the store.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::category::Category;
use crate::collection::Collection;
use crate::error::ServiceError;
use crate::filters::Filters;
use crate::produce::{ProduceFactory, ProduceFields, ProduceView};
use crate::resolver::CollectionResolver;
use crate::store::ProduceStore;
use crate::unit::Unit;

/// Validated payload for adding one produce item. The transport layer
/// checks field presence and choices before this is decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct ProduceInput {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(rename = "type")]
    pub produce_type: Category,
}

/// Application service over the produce collections.
pub struct ProduceService {
    resolver: CollectionResolver,
    factory: ProduceFactory,
}

impl ProduceService {
    pub fn new(resolver: CollectionResolver, factory: ProduceFactory) -> Self {
        Self { resolver, factory }
    }

    /// Wire a service over the given store with one collection per category.
    pub fn with_store(store: Arc<dyn ProduceStore>) -> Self {
        let collections = Category::ALL
            .into_iter()
            .map(|category| Collection::new(category, store.clone()))
            .collect();
        Self::new(CollectionResolver::new(collections), ProduceFactory)
    }

    /// Add one item to the collection named by its `type` field and return
    /// that collection's full unfiltered list.
    pub fn add_to_collection(
        &self,
        input: ProduceInput,
    ) -> Result<Vec<ProduceView>, ServiceError> {
        let category = input.produce_type;
        let collection = self.resolver.resolve(category)?;

        let produce = self.factory.create_instance(
            category,
            ProduceFields {
                id: input.id,
                name: input.name,
                quantity: input.quantity,
                unit: input.unit,
            },
        )?;
        debug!(category = category.as_str(), id = produce.id(), "adding produce");

        collection.add(produce.id(), &produce)?;
        Ok(collection.list(&Filters::default())?)
    }

    /// Remove an item by id, failing with [`ServiceError::NotFound`] when
    /// the id is absent from the category.
    pub fn remove_from_collection(
        &self,
        category: Category,
        id: u64,
    ) -> Result<(), ServiceError> {
        let collection = self.resolver.resolve(category)?;

        if collection.get(id)?.is_none() {
            return Err(ServiceError::NotFound(id));
        }
        collection.remove(id)?;
        Ok(())
    }

    /// List one category, or with `None` every category filtered
    /// independently, keyed by plural label.
    pub fn get_collection(
        &self,
        category: Option<Category>,
        filters: &Filters,
    ) -> Result<Map<String, Value>, ServiceError> {
        let categories: &[Category] = match category {
            Some(ref c) => std::slice::from_ref(c),
            None => &Category::ALL,
        };

        let mut data = Map::new();
        for &category in categories {
            let collection = self.resolver.resolve(category)?;
            let views = collection.list(filters)?;
            data.insert(category.plural().to_string(), serde_json::to_value(views)?);
        }
        Ok(data)
    }

    /// Substring search within one category, results in the given unit.
    pub fn search_produces(
        &self,
        category: Category,
        query: &str,
        unit: Unit,
    ) -> Result<Vec<ProduceView>, ServiceError> {
        let collection = self.resolver.resolve(category)?;
        Ok(collection.search(query, unit)?)
    }
}
