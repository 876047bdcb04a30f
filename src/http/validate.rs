//! Request payload validation.
//!
//! Checks run over the raw JSON value so that every violated rule is
//! reported, one message per rule, in a fixed order: name presence →
//! quantity positivity/type → unit choice → type choice → id type. A
//! payload that passes is guaranteed to decode into
//! [`crate::service::ProduceInput`].

use serde_json::Value;

use crate::category::Category;
use crate::unit::Unit;

/// Validate one produce item payload, returning the ordered violation
/// messages (empty when valid).
pub fn produce_payload(payload: &Value) -> Vec<String> {
    let mut violations = Vec::new();

    match payload.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {}
        _ => violations.push("Name is required".to_string()),
    }

    match payload.get("quantity") {
        None | Some(Value::Null) => violations.push("Quantity is required".to_string()),
        Some(value) => match value.as_f64() {
            Some(quantity) if quantity > 0.0 => {}
            Some(_) => violations.push("Quantity must be positive".to_string()),
            None => violations.push("Quantity must be a number".to_string()),
        },
    }

    match payload.get("unit") {
        None | Some(Value::Null) => violations.push("Unit is required".to_string()),
        Some(value) => {
            if value.as_str().and_then(Unit::parse).is_none() {
                violations.push("Unit must be either \"g\" or \"kg\"".to_string());
            }
        }
    }

    match payload.get("type") {
        None | Some(Value::Null) => violations.push("Type is required".to_string()),
        Some(value) => {
            if value.as_str().and_then(Category::parse).is_none() {
                violations
                    .push("Type must be either \"fruit\" or \"vegetable\"".to_string());
            }
        }
    }

    if let Some(id) = payload.get("id") {
        if !id.is_null() && id.as_u64().is_none() {
            violations.push("Id must be an integer".to_string());
        }
    }

    violations
}
