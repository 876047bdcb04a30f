//! HTTP integration tests.
//!
//! Starts an axum server backed by a temp storage directory and exercises
//! it with reqwest.

use std::sync::Arc;

use greengrocer::{http, FileStore, ProduceService};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Bind to port 0 and return the base URL. The TempDir guard keeps the
/// storage directory alive for the duration of the test.
async fn start_server() -> (String, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));
    let service = Arc::new(ProduceService::with_store(store));

    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), dir)
}

fn apple() -> Value {
    json!({ "id": 1, "name": "Apple", "type": "fruit", "quantity": 1000, "unit": "g" })
}

fn carrot() -> Value {
    json!({ "id": 2, "name": "Carrot", "type": "vegetable", "quantity": 500, "unit": "g" })
}

#[tokio::test]
async fn health_check() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn add_fruit_returns_created_list() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/fruits"))
        .json(&apple())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["data"]["fruits"],
        json!([{ "id": 1, "name": "Apple", "quantity": 1000.0, "unit": "g" }])
    );
}

#[tokio::test]
async fn get_fruits_lists_only_fruits() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();
    client.post(format!("{base}/api/vegetables")).json(&carrot()).send().await.unwrap();

    let resp = client.get(format!("{base}/api/fruits")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let data = body["data"].as_object().unwrap();
    assert!(data.contains_key("fruits"));
    assert!(!data.contains_key("vegetables"));

    let names: Vec<&str> = data["fruits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Apple"]);
}

#[tokio::test]
async fn unit_filter_converts_display_only() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();

    let resp = client
        .get(format!("{base}/api/fruits?unit=kg"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["data"]["fruits"],
        json!([{ "id": 1, "name": "Apple", "quantity": 1.0, "unit": "kg" }])
    );
}

#[tokio::test]
async fn quantity_bounds_are_inclusive_and_in_grams() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();

    // 1000 g falls inside [500, 1500].
    let resp = client
        .get(format!("{base}/api/fruits?min_quantity=500&max_quantity=1500"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fruits"].as_array().unwrap().len(), 1);

    // Bounds stay in grams even when displaying kilograms.
    let resp = client
        .get(format!("{base}/api/fruits?min_quantity=500&unit=kg"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["data"]["fruits"],
        json!([{ "id": 1, "name": "Apple", "quantity": 1.0, "unit": "kg" }])
    );

    let resp = client
        .get(format!("{base}/api/fruits?min_quantity=1500"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["fruits"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn name_filter_is_case_insensitive() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();

    let resp = client
        .get(format!("{base}/api/fruits?name=APPLE"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fruits"].as_array().unwrap().len(), 1);

    let resp = client
        .get(format!("{base}/api/fruits?name=Banana"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["fruits"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_payload_reports_ordered_violations() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/fruits"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["errors"],
        json!([
            "Name is required",
            "Quantity is required",
            "Unit is required",
            "Type is required",
        ])
    );
}

#[tokio::test]
async fn invalid_values_report_ordered_violations() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/fruits"))
        .json(&json!({ "name": "", "quantity": -1, "unit": "lbs", "type": "meat" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["errors"],
        json!([
            "Name is required",
            "Quantity must be positive",
            "Unit must be either \"g\" or \"kg\"",
            "Type must be either \"fruit\" or \"vegetable\"",
        ])
    );
}

#[tokio::test]
async fn delete_existing_returns_no_content() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();

    let resp = client
        .delete(format!("{base}/api/fruits/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client.get(format!("{base}/api/fruits")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["fruits"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_returns_not_found_with_message() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/fruits/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Produce with ID 999 not found.");
}

#[tokio::test]
async fn aggregate_lists_both_categories() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();
    client.post(format!("{base}/api/vegetables")).json(&carrot()).send().await.unwrap();

    let resp = client.get(format!("{base}/api/produces")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fruits"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["vegetables"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn aggregate_type_filter_narrows_to_one_category() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();
    client.post(format!("{base}/api/vegetables")).json(&carrot()).send().await.unwrap();

    let resp = client
        .get(format!("{base}/api/produces?type=fruit"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let data = body["data"].as_object().unwrap();
    assert!(data.contains_key("fruits"));
    assert!(!data.contains_key("vegetables"));

    // An unresolvable type falls back to the full aggregate.
    let resp = client
        .get(format!("{base}/api/produces?type=meat"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let data = body["data"].as_object().unwrap();
    assert!(data.contains_key("fruits"));
    assert!(data.contains_key("vegetables"));
}

#[tokio::test]
async fn aggregate_post_applies_items_in_order() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/produces"))
        .json(&json!([apple(), carrot()]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fruits"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["vegetables"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn aggregate_post_rejects_any_invalid_item() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/produces"))
        .json(&json!([apple(), { "name": "Mystery" }]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["errors"],
        json!(["Quantity is required", "Unit is required", "Type is required"])
    );

    // Nothing was applied.
    let resp = client.get(format!("{base}/api/produces")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["fruits"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_matches_substrings() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();
    client
        .post(format!("{base}/api/fruits"))
        .json(&json!({ "id": 3, "name": "Pineapple", "type": "fruit", "quantity": 2, "unit": "kg" }))
        .send()
        .await
        .unwrap();

    let resp = client
        .get(format!("{base}/api/fruits/search?q=apple"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Apple", "Pineapple"]);

    // Empty query matches everything; unit applies to the display form.
    let resp = client
        .get(format!("{base}/api/fruits/search?unit=kg"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let quantities: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["quantity"].as_f64().unwrap())
        .collect();
    assert_eq!(quantities, vec![1.0, 2.0]);
}

#[tokio::test]
async fn post_with_mismatched_type_lands_in_the_body_category() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    // POSTed to /api/fruits but typed as a vegetable: stored under
    // vegetables, while the response lists the route's category.
    let resp = client
        .post(format!("{base}/api/fruits"))
        .json(&carrot())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["fruits"].as_array().unwrap().is_empty());

    let resp = client.get(format!("{base}/api/vegetables")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["vegetables"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_collection_is_not_found() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/meats")).send().await.unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .post(format!("{base}/api/meats"))
        .json(&apple())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn records_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let client = reqwest::Client::new();

    // First server instance writes.
    {
        let store = Arc::new(FileStore::new(dir.path()));
        let service = Arc::new(ProduceService::with_store(store));
        let app = http::router(service);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let base = format!("http://{addr}");
        client.post(format!("{base}/api/fruits")).json(&apple()).send().await.unwrap();
    }

    // Second instance over the same directory sees the record.
    let store = Arc::new(FileStore::new(dir.path()));
    let service = Arc::new(ProduceService::with_store(store));
    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let base = format!("http://{addr}");

    let resp = client.get(format!("{base}/api/fruits")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fruits"].as_array().unwrap().len(), 1);
}
