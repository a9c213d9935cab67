//! End-to-end tests for the ice cream HTTP API.
//!
//! Each test builds the full router over an in-memory store and drives it
//! with `tower::ServiceExt::oneshot`, so no port is bound.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use icecream_cart::http_server::{HttpServer, HttpServerConfig};
use icecream_cart::model::{IceCream, IceCreamFields, NO_DESCRIPTION};
use icecream_cart::rest_api::IceCreamFacade;
use icecream_cart::store::{
    InMemoryStore, InsertOutcome, RecordStore, StoreError, StoreResult, UpdateOutcome,
};

// =============================================================================
// Harness
// =============================================================================

fn app_with_store(store: Arc<dyn RecordStore>) -> Router {
    let facade = Arc::new(IceCreamFacade::new(store, Duration::from_secs(2)));
    HttpServer::new(HttpServerConfig::default(), facade).router()
}

fn sample_app() -> Router {
    app_with_store(Arc::new(InMemoryStore::with_sample_data()))
}

fn product(id: i64, name: &str) -> IceCream {
    IceCream {
        id,
        name: name.to_string(),
        price: 2.5,
        quantity: 10,
        on_display: true,
        description: format!("{} scoop", name),
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn ids_of(value: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = value
        .as_array()
        .expect("array body")
        .iter()
        .map(|p| p["Id"].as_i64().expect("numeric id"))
        .collect();
    ids.sort_unstable();
    ids
}

fn new_flavour() -> Value {
    json!({
        "Name": "Pistachio",
        "Price": 3.75,
        "Quantity": 40,
        "OnDisplay": true,
        "Description": "roasted pistachio"
    })
}

// =============================================================================
// Heartbeat and health
// =============================================================================

#[tokio::test]
async fn test_heartbeat() {
    let app = sample_app();
    let (status, body) = send(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Welcome to your icecream cart! We offer thousands of flavors."
    );
}

#[tokio::test]
async fn test_health() {
    let app = sample_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"health": "OK"}));
}

// =============================================================================
// Listing and selectors
// =============================================================================

#[tokio::test]
async fn test_list_without_selectors_returns_everything() {
    let app = sample_app();
    let (status, body) = send(&app, Method::GET, "/icecream", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_of(&body), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_list_union_of_id_and_name() {
    let store = InMemoryStore::with_products(vec![product(1, "vanilla"), product(2, "mint")]);
    let app = app_with_store(Arc::new(store));

    let (status, body) = send(&app, Method::GET, "/icecream?id=1&name=mint", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_of(&body), vec![1, 2]);

    // Both selectors hit product 1; it is listed once.
    let (_, body) = send(&app, Method::GET, "/icecream?id=1&name=vanilla", None).await;
    assert_eq!(ids_of(&body), vec![1]);
}

#[tokio::test]
async fn test_list_unmatched_selector_is_empty() {
    let app = sample_app();
    let (status, body) = send(&app, Method::GET, "/icecream?id=99", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_selector_keys_ignore_case() {
    let app = sample_app();
    let (_, lower) = send(&app, Method::GET, "/icecream?id=1", None).await;
    let (_, upper) = send(&app, Method::GET, "/icecream?ID=1", None).await;

    assert_eq!(lower, upper);
    assert_eq!(ids_of(&upper), vec![1]);
}

#[tokio::test]
async fn test_list_ignores_unparsable_ids() {
    let app = sample_app();
    let (status, body) = send(&app, Method::GET, "/icecream?id=two&id=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_of(&body), vec![2]);
}

#[tokio::test]
async fn test_list_unknown_keys_do_not_filter() {
    let app = sample_app();
    let (_, body) = send(&app, Method::GET, "/icecream?flavour=mint", None).await;

    assert_eq!(ids_of(&body), vec![1, 2, 3, 4, 5]);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_assigns_next_id_and_is_idempotent() {
    let app = sample_app();

    let (status, first) = send(&app, Method::POST, "/icecream", Some(new_flavour())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["Id"], 6);

    let (status, second) = send(&app, Method::POST, "/icecream", Some(new_flavour())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);

    let (_, all) = send(&app, Method::GET, "/icecream", None).await;
    assert_eq!(ids_of(&all), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_create_into_empty_store_starts_at_one() {
    let app = app_with_store(Arc::new(InMemoryStore::new()));
    let (status, body) = send(&app, Method::POST, "/icecream", Some(new_flavour())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["Id"], 1);
}

#[tokio::test]
async fn test_create_duplicate_name_conflicts() {
    let app = sample_app();
    let mut body = new_flavour();
    body["Name"] = json!("vanilla");

    let (status, error) = send(&app, Method::POST, "/icecream", Some(body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["ErrorKey"], "DUPLICATE_ICECREAM");
    assert_eq!(
        error["ErrorMessage"],
        "Unable to process the request. Icecream with same name vanilla exist"
    );
}

#[tokio::test]
async fn test_create_round_trip_applies_placeholder() {
    let app = sample_app();
    let submitted = json!({
        "Name": "Lemon Sorbet",
        "Price": 2.25,
        "Quantity": 30,
        "OnDisplay": false,
        "Description": ""
    });

    let (status, created) = send(&app, Method::POST, "/icecream", Some(submitted)).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["Id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/icecream/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched,
        json!({
            "Id": id,
            "Name": "Lemon Sorbet",
            "Price": 2.25,
            "Quantity": 30,
            "OnDisplay": false,
            "Description": NO_DESCRIPTION
        })
    );
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let app = sample_app();
    let mut body = new_flavour();
    body["Quantity"] = json!(-1);

    let (status, error) = send(&app, Method::POST, "/icecream", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["ErrorKey"], "GENERIC_ERROR");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = sample_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/icecream")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"Name\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["ErrorKey"], "GENERIC_ERROR");
}

// =============================================================================
// Get
// =============================================================================

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let app = sample_app();
    let (status, error) = send(&app, Method::GET, "/icecream/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["ErrorKey"], "ICECREAM_NOT_FOUND");
    assert_eq!(error["ErrorMessage"], "No matching icecream with id 42 found");
}

#[tokio::test]
async fn test_non_positive_ids_are_bad_request() {
    let app = sample_app();

    for (method, uri) in [
        (Method::GET, "/icecream/0"),
        (Method::DELETE, "/icecream/-3"),
    ] {
        let (status, error) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(error["ErrorKey"], "GENERIC_ERROR");
    }

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/icecream/0",
        Some(json!({"Price": 1.5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_non_numeric_id_is_bad_request() {
    let app = sample_app();
    let (status, error) = send(&app, Method::GET, "/icecream/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["ErrorKey"], "GENERIC_ERROR");
}

// =============================================================================
// Replace
// =============================================================================

#[tokio::test]
async fn test_replace_id_mismatch() {
    let app = sample_app();
    let body = json!({
        "Id": 4,
        "Name": "Mint chocolate chip",
        "Price": 3.2,
        "Quantity": 110,
        "Description": "mint"
    });

    let (status, error) = send(&app, Method::PUT, "/icecream/3", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["ErrorKey"], "ICECREAM_ID_MISMATCH");
}

#[tokio::test]
async fn test_replace_overwrites_and_keeps_display_flag() {
    let app = sample_app();
    let body = json!({
        "Id": 3,
        "Name": "Mint chip",
        "Price": 3.6,
        "Quantity": 90,
        "OnDisplay": false,
        "Description": "fresh mint"
    });

    let (status, updated) = send(&app, Method::PUT, "/icecream/3", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Name"], "Mint chip");
    assert_eq!(updated["Price"], 3.6);
    assert_eq!(updated["Quantity"], 90);
    assert_eq!(updated["OnDisplay"], true);

    let (_, fetched) = send(&app, Method::GET, "/icecream/3", None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_replace_missing_is_not_found() {
    let app = sample_app();
    let body = json!({
        "Id": 77,
        "Name": "Ghost",
        "Price": 1.0,
        "Quantity": 1,
        "Description": "not here"
    });

    let (status, error) = send(&app, Method::PUT, "/icecream/77", Some(body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["ErrorKey"], "ICECREAM_NOT_FOUND");
}

#[tokio::test]
async fn test_replace_onto_other_name_conflicts() {
    let app = sample_app();
    let body = json!({
        "Id": 3,
        "Name": "Blue Moon",
        "Price": 3.2,
        "Quantity": 110,
        "Description": "mint"
    });

    let (status, error) = send(&app, Method::PUT, "/icecream/3", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["ErrorKey"], "ICECREAM_NAME_CONFLICT");
}

// =============================================================================
// Patch
// =============================================================================

#[tokio::test]
async fn test_patch_changes_only_supplied_fields() {
    let app = sample_app();
    let (status, patched) = send(
        &app,
        Method::PATCH,
        "/icecream/2",
        Some(json!({"Quantity": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["Quantity"], 5);
    assert_eq!(patched["Name"], "Blue Moon");
    assert_eq!(patched["Price"], 2.0);
}

#[tokio::test]
async fn test_patch_keeping_own_name_is_allowed() {
    let app = sample_app();
    let (status, patched) = send(
        &app,
        Method::PATCH,
        "/icecream/2",
        Some(json!({"Name": "Blue Moon", "Price": 2.4})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["Price"], 2.4);
}

#[tokio::test]
async fn test_patch_name_conflict() {
    let app = sample_app();
    let (status, error) = send(
        &app,
        Method::PATCH,
        "/icecream/2",
        Some(json!({"Name": "vanilla"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["ErrorKey"], "ICECREAM_NAME_CONFLICT");
}

#[tokio::test]
async fn test_patch_missing_is_not_found() {
    let app = sample_app();
    let (status, error) = send(
        &app,
        Method::PATCH,
        "/icecream/404",
        Some(json!({"Price": 1.5})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["ErrorKey"], "ICECREAM_NOT_FOUND");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_get() {
    let app = sample_app();

    let (status, body) = send(&app, Method::DELETE, "/icecream/4", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, "/icecream/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, error) = send(&app, Method::DELETE, "/icecream/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["ErrorKey"], "ICECREAM_NOT_FOUND");
}

// =============================================================================
// Store failures
// =============================================================================

/// Store whose every call fails
struct BrokenStore;

#[async_trait]
impl RecordStore for BrokenStore {
    async fn fetch_all(&self) -> StoreResult<Vec<IceCream>> {
        Err(StoreError::Backend("relation \"icecream\" does not exist".to_string()))
    }

    async fn fetch_by_ids(&self, _ids: &[String]) -> StoreResult<Vec<IceCream>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn fetch_by_names(&self, _names: &[String]) -> StoreResult<Vec<IceCream>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert(&self, _fields: IceCreamFields) -> StoreResult<InsertOutcome> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update(&self, _id: i64, _fields: &IceCreamFields) -> StoreResult<UpdateOutcome> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _id: i64) -> StoreResult<bool> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let app = app_with_store(Arc::new(BrokenStore));

    for (method, uri, body) in [
        (Method::GET, "/icecream", None),
        (Method::GET, "/icecream/1", None),
        (Method::POST, "/icecream", Some(new_flavour())),
        (Method::DELETE, "/icecream/1", None),
    ] {
        let (status, error) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(error["ErrorKey"], "GENERIC_ERROR");
    }
}

#[tokio::test]
async fn test_health_does_not_touch_store() {
    let app = app_with_store(Arc::new(BrokenStore));
    let (status, _) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
}
