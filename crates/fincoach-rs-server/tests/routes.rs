//! HTTP-level tests for the edge service, driven through the router.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fincoach_rs_protocol::IndexEntry;
use fincoach_rs_server::{EdgeState, MemoryKv, router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    router(Arc::new(EdgeState::new(MemoryKv::new())))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

fn save_request(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/finance/save")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn save_get_list_delete_round_trip() {
    let app = app();

    let payload = json!({
        "id": "advice_1700000000000",
        "type": "budget",
        "formData": {"monthlyIncome": 8000},
        "response": "## Plan",
        "timestamp": "2026-01-15T08:30:00Z",
    });
    let (status, body) = send(&app, save_request(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let saved: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(saved, json!({"success": true, "id": "advice_1700000000000"}));

    let (status, body) = send(&app, get_request("/api/finance/get/advice_1700000000000")).await;
    assert_eq!(status, StatusCode::OK);
    let record: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(record["type"], "budget");
    assert_eq!(record["formData"]["monthlyIncome"], json!(8000));

    let (status, body) = send(&app, get_request("/api/finance/list")).await;
    assert_eq!(status, StatusCode::OK);
    let index: Vec<IndexEntry> = serde_json::from_slice(&body).expect("index");
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].id, "advice_1700000000000");
    assert_eq!(index[0].summary, "monthly income 8000 budget plan");

    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/finance/delete/advice_1700000000000")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    let deleted: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(deleted, json!({"success": true}));

    let (status, _) = send(&app, get_request("/api/finance/get/advice_1700000000000")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = send(&app, get_request("/api/finance/list")).await;
    let index: Vec<IndexEntry> = serde_json::from_slice(&body).expect("index");
    assert_eq!(index.len(), 0);
}

#[tokio::test]
async fn save_assigns_an_id_when_absent() {
    let app = app();
    let payload = json!({
        "type": "purchase",
        "formData": {"productName": "laptop", "productPrice": 1299},
        "response": "...",
    });
    let (status, body) = send(&app, save_request(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let saved: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(saved["success"], json!(true));
    let id = saved["id"].as_str().expect("id");
    assert!(id.starts_with("advice_"));

    let (status, body) = send(&app, get_request(&format!("/api/finance/get/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let record: Value = serde_json::from_slice(&body).expect("json");
    // The server also assigns the creation timestamp when absent.
    assert!(record["timestamp"].is_string());
}

#[tokio::test]
async fn missing_record_yields_json_404() {
    let (status, body) = send(&app(), get_request("/api/finance/get/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(error, json!({"error": "Not found"}));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();
    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/finance/delete/never_saved")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    let deleted: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(deleted, json!({"success": true}));
}

#[tokio::test]
async fn unmatched_paths_yield_plain_404() {
    let (status, body) = send(&app(), get_request("/api/finance/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Not Found");
}

#[tokio::test]
async fn preflight_is_answered_with_permissive_cors() {
    let app = app();
    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/finance/save")
        .header(header::ORIGIN, "https://finance.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(preflight).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
