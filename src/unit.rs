//! Units of measure for produce quantities.
//!
//! Quantities are held canonically in grams; `Unit` converts between the
//! canonical value and a caller-chosen display value. Conversion is plain
//! floating-point multiplication/division with no rounding or clamping.

use serde::{Deserialize, Serialize};

/// A unit of measure. Wire values are `"g"` and `"kg"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
}

impl Unit {
    /// Parse a unit from its wire value. Returns `None` for anything other
    /// than `"g"` or `"kg"`.
    pub fn parse(value: &str) -> Option<Unit> {
        match value {
            "g" => Some(Unit::Gram),
            "kg" => Some(Unit::Kilogram),
            _ => None,
        }
    }

    /// The wire value for this unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
        }
    }

    /// Convert a quantity expressed in this unit to grams.
    pub fn to_grams(&self, quantity: f64) -> f64 {
        match self {
            Unit::Gram => quantity,
            Unit::Kilogram => quantity * 1000.0,
        }
    }

    /// Convert a quantity in grams to this unit.
    pub fn from_grams(&self, grams: f64) -> f64 {
        match self {
            Unit::Gram => grams,
            Unit::Kilogram => grams / 1000.0,
        }
    }
}
