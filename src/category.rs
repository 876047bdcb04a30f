//! Produce categories.
//!
//! A closed set of two: each category has its own storage partition and its
//! own collection. The plural label doubles as the grouping key in aggregate
//! responses and the URL path segment.

use serde::{Deserialize, Serialize};

/// The kind of produce. Wire values are `"fruit"` and `"vegetable"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "fruit")]
    Fruit,
    #[serde(rename = "vegetable")]
    Vegetable,
}

impl Category {
    /// Every category, in aggregate-response order.
    pub const ALL: [Category; 2] = [Category::Fruit, Category::Vegetable];

    /// Parse a category from its wire value.
    pub fn parse(value: &str) -> Option<Category> {
        match value {
            "fruit" => Some(Category::Fruit),
            "vegetable" => Some(Category::Vegetable),
            _ => None,
        }
    }

    /// The wire value for this category. Also the storage file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fruit => "fruit",
            Category::Vegetable => "vegetable",
        }
    }

    /// Plural display label, e.g. `"fruits"`.
    pub fn plural(&self) -> &'static str {
        match self {
            Category::Fruit => "fruits",
            Category::Vegetable => "vegetables",
        }
    }

    /// Parse a category from its plural label (URL path segments).
    pub fn from_plural(value: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.plural() == value)
    }
}
