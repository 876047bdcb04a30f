//! Produce records and the factory that builds them from raw fields.
//!
//! A record's quantity is converted to grams at construction time and held
//! canonically in grams from then on. Any other unit is a display-time
//! conversion through [`Produce::to_view`].

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::unit::Unit;

/// One produce item. Quantity is canonical grams; the category is fixed at
/// creation and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Produce {
    id: u64,
    name: String,
    quantity_grams: f64,
    category: Category,
}

impl Produce {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity_grams(&self) -> f64 {
        self.quantity_grams
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The quantity converted to the given unit.
    pub fn quantity_in(&self, unit: Unit) -> f64 {
        unit.from_grams(self.quantity_grams)
    }

    /// The record's display form in the given unit.
    pub fn to_view(&self, unit: Unit) -> ProduceView {
        ProduceView {
            id: self.id,
            name: self.name.clone(),
            quantity: self.quantity_in(unit),
            unit,
        }
    }
}

/// External representation of a record in a caller-chosen unit. Also the
/// shape persisted to category files (always with [`Unit::Gram`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProduceView {
    pub id: u64,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
}

/// Raw fields a record is built from: a POST payload or one persisted file
/// entry. The unit arrives as its wire string and is parsed strictly by the
/// factory.
#[derive(Debug, Clone, Deserialize)]
pub struct ProduceFields {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Error type for record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// The supplied unit does not resolve to a known unit. Creation is
    /// strict here, unlike the lenient grams fallback on the filter path.
    UnknownUnit(String),
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::UnknownUnit(value) => write!(f, "unknown unit: {}", value),
        }
    }
}

impl std::error::Error for FactoryError {}

/// Builds typed records from raw fields for a given category.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProduceFactory;

impl ProduceFactory {
    /// Build a record. The quantity is converted to grams using the supplied
    /// unit; a missing id falls back to the current epoch seconds.
    pub fn create_instance(
        &self,
        category: Category,
        fields: ProduceFields,
    ) -> Result<Produce, FactoryError> {
        let unit = Unit::parse(&fields.unit)
            .ok_or_else(|| FactoryError::UnknownUnit(fields.unit.clone()))?;

        Ok(Produce {
            id: fields.id.unwrap_or_else(fallback_id),
            name: fields.name,
            quantity_grams: unit.to_grams(fields.quantity),
            category,
        })
    }
}

/// Fallback id for records created without one: current epoch seconds.
/// Coarse enough to collide for near-simultaneous inserts; callers that care
/// about identity supply their own ids.
fn fallback_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
