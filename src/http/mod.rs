//! HTTP transport — maps REST routes onto the produce service.
//!
//! Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /api/{plural}` — list one category, query filters `name`,
//!   `min_quantity`, `max_quantity`, `unit`.
//! - `POST /api/{plural}` — add one item (validated, 201 with the route
//!   category's updated list).
//! - `DELETE /api/{plural}/{id}` — 204, or 404 when absent.
//! - `GET /api/{plural}/search?q=&unit=` — substring search.
//! - `GET /api/produces` — aggregate across categories, optional `type`.
//! - `POST /api/produces` — add an array of items, 201 with the aggregate.
//! - `GET /health` — health check.
//!
//! `{plural}` is `fruits` or `vegetables`; anything else is a 404. Bodies
//! arrive as raw JSON and are checked by [`validate`] before the typed
//! decode, so validation failures report every violated rule in a fixed
//! order instead of failing at the first decode error.

mod validate;

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::category::Category;
use crate::error::ServiceError;
use crate::filters::Filters;
use crate::service::{ProduceInput, ProduceService};

/// Build an axum `Router` over the given service.
pub fn router(service: Arc<ProduceService>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/produces", get(list_produces).post(add_produces))
        .route("/api/:collection", get(list_collection).post(add_to_collection))
        .route("/api/:collection/search", get(search_collection))
        .route("/api/:collection/:id", delete(delete_from_collection))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(service: Arc<ProduceService>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /api/{plural}` — single-category listing with filters.
async fn list_collection(
    State(service): State<Arc<ProduceService>>,
    Path(collection): Path<String>,
    Query(filters): Query<Filters>,
) -> Response {
    let Some(category) = Category::from_plural(&collection) else {
        return unknown_collection(&collection);
    };

    match service.get_collection(Some(category), &filters) {
        Ok(data) => (StatusCode::OK, Json(json!({ "data": data }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `POST /api/{plural}` — add one item.
///
/// The item lands in the collection named by the body's `type` field, which
/// may differ from the route; the response always lists the route's
/// category.
async fn add_to_collection(
    State(service): State<Arc<ProduceService>>,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    let Some(category) = Category::from_plural(&collection) else {
        return unknown_collection(&collection);
    };

    let violations = validate::produce_payload(&payload);
    if !violations.is_empty() {
        return violations_response(violations);
    }

    let input: ProduceInput = match serde_json::from_value(payload) {
        Ok(input) => input,
        Err(e) => return decode_failed(&e),
    };

    if let Err(e) = service.add_to_collection(input) {
        return error_response(&e);
    }

    match service.get_collection(Some(category), &Filters::default()) {
        Ok(data) => (StatusCode::CREATED, Json(json!({ "data": data }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `DELETE /api/{plural}/{id}`
async fn delete_from_collection(
    State(service): State<Arc<ProduceService>>,
    Path((collection, id)): Path<(String, u64)>,
) -> Response {
    let Some(category) = Category::from_plural(&collection) else {
        return unknown_collection(&collection);
    };

    match service.remove_from_collection(category, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    unit: Option<String>,
}

/// `GET /api/{plural}/search` — substring search. The unit is the lenient
/// display path: unknown values fall back to grams.
async fn search_collection(
    State(service): State<Arc<ProduceService>>,
    Path(collection): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let Some(category) = Category::from_plural(&collection) else {
        return unknown_collection(&collection);
    };

    let unit = query
        .unit
        .as_deref()
        .and_then(crate::unit::Unit::parse)
        .unwrap_or_default();

    match service.search_produces(category, query.q.as_deref().unwrap_or(""), unit) {
        Ok(views) => (StatusCode::OK, Json(json!({ "data": views }))).into_response(),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Default, Deserialize)]
struct AggregateQuery {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    min_quantity: Option<f64>,
    #[serde(default)]
    max_quantity: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default, rename = "type")]
    produce_type: Option<String>,
}

impl AggregateQuery {
    /// Unresolvable `type` values fall back to the full aggregate.
    fn category(&self) -> Option<Category> {
        self.produce_type.as_deref().and_then(Category::parse)
    }

    fn filters(&self) -> Filters {
        Filters {
            name: self.name.clone().filter(|s| !s.is_empty()),
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
            unit: self.unit.clone().filter(|s| !s.is_empty()),
        }
    }
}

/// `GET /api/produces` — aggregate listing, optionally narrowed by `type`.
async fn list_produces(
    State(service): State<Arc<ProduceService>>,
    Query(query): Query<AggregateQuery>,
) -> Response {
    match service.get_collection(query.category(), &query.filters()) {
        Ok(data) => (StatusCode::OK, Json(json!({ "data": data }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `POST /api/produces` — add an array of items.
///
/// Every item is validated up front; any violation fails the whole request
/// before anything is applied.
async fn add_produces(
    State(service): State<Arc<ProduceService>>,
    Json(payload): Json<Value>,
) -> Response {
    let Some(items) = payload.as_array() else {
        return violations_response(vec![
            "Payload must be an array of produce items".to_string(),
        ]);
    };

    let violations: Vec<String> = items
        .iter()
        .flat_map(validate::produce_payload)
        .collect();
    if !violations.is_empty() {
        return violations_response(violations);
    }

    for item in items {
        let input: ProduceInput = match serde_json::from_value(item.clone()) {
            Ok(input) => input,
            Err(e) => return decode_failed(&e),
        };
        if let Err(e) = service.add_to_collection(input) {
            return error_response(&e);
        }
    }

    match service.get_collection(None, &Filters::default()) {
        Ok(data) => (StatusCode::CREATED, Json(json!({ "data": data }))).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

fn violations_response(violations: Vec<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "errors": violations }))).into_response()
}

fn decode_failed(e: &serde_json::Error) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": format!("decode failed: {}", e) })),
    )
        .into_response()
}

fn unknown_collection(collection: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("unknown collection: {}", collection) })),
    )
        .into_response()
}
