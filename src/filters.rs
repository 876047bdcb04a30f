//! Listing filters.
//!
//! Every field is explicitly optional: `None` means "not set" and never
//! filters, so there is no ambiguity between an absent filter and a zero or
//! empty value. Quantity bounds compare against the canonical grams value
//! regardless of the requested display unit. The `unit` field selects the
//! display unit only; it never filters, and an unresolvable value falls
//! back to grams rather than failing (the strict parse is reserved for
//! record creation).

use serde::{Deserialize, Deserializer};

use crate::produce::Produce;
use crate::unit::Unit;

/// Optional criteria applied to a category listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filters {
    /// Exact name match, case-insensitive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    /// Inclusive lower bound in grams.
    #[serde(default)]
    pub min_quantity: Option<f64>,
    /// Inclusive upper bound in grams.
    #[serde(default)]
    pub max_quantity: Option<f64>,
    /// Requested display unit as its wire value. Display only.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub unit: Option<String>,
}

impl Filters {
    /// The display unit requested by this filter set. Absent or unknown
    /// values default to grams.
    pub fn display_unit(&self) -> Unit {
        self.unit
            .as_deref()
            .and_then(Unit::parse)
            .unwrap_or(Unit::Gram)
    }

    /// Whether a record survives this filter set.
    pub fn matches(&self, produce: &Produce) -> bool {
        if let Some(name) = &self.name {
            if produce.name().to_lowercase() != name.to_lowercase() {
                return false;
            }
        }
        if let Some(min) = self.min_quantity {
            if produce.quantity_grams() < min {
                return false;
            }
        }
        if let Some(max) = self.max_quantity {
            if produce.quantity_grams() > max {
                return false;
            }
        }
        true
    }
}

/// Keep the records matching the filter set, preserving scan order. Shared
/// by every category collection.
pub fn apply_filters(produces: Vec<Produce>, filters: &Filters) -> Vec<Produce> {
    produces.into_iter().filter(|p| filters.matches(p)).collect()
}

/// Query strings deliver present-but-empty values as `""`; treat those as
/// not set.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
