//! HTTP surface of the edge service.

use crate::{EdgeError, KvStore, read_index, remove_from_index, upsert_into_index};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete as delete_route, get, post};
use axum::{Json, Router};
use chrono::Utc;
use fincoach_rs_protocol::{AdviceDraft, AdviceRecord, IndexEntry, generate_edge_id};
use log::{info, warn};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Shared state behind the router: the backing KV.
pub struct EdgeState {
    kv: Box<dyn KvStore>,
}

impl EdgeState {
    /// Wrap a KV backend for serving.
    pub fn new(kv: impl KvStore + 'static) -> Self {
        Self { kv: Box::new(kv) }
    }
}

type SharedState = Arc<EdgeState>;

/// Uncaught handler errors become a 500 with a JSON error body.
impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        warn!("edge handler failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": self.to_string()})),
        )
            .into_response()
    }
}

/// Build the edge router with permissive CORS and a plain 404 fallback.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/finance/save", post(save))
        .route("/api/finance/list", get(list))
        .route("/api/finance/get/{id}", get(get_record))
        .route("/api/finance/delete/{id}", delete_route(delete_record))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

/// Serve the router on an already-bound listener.
pub async fn serve(listener: TcpListener, state: SharedState) -> std::io::Result<()> {
    info!("edge store listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

async fn save(
    State(state): State<SharedState>,
    Json(draft): Json<AdviceDraft>,
) -> Result<Json<Value>, EdgeError> {
    let record = AdviceRecord {
        id: draft.id.unwrap_or_else(generate_edge_id),
        kind: draft.kind,
        form_data: draft.form_data,
        response: draft.response,
        timestamp: draft.timestamp.unwrap_or_else(Utc::now),
    };
    state.kv.put(&record.id, &serde_json::to_string(&record)?)?;
    upsert_into_index(state.kv.as_ref(), &record)?;
    Ok(Json(json!({"success": true, "id": record.id})))
}

async fn list(State(state): State<SharedState>) -> Result<Json<Vec<IndexEntry>>, EdgeError> {
    Ok(Json(read_index(state.kv.as_ref())?))
}

async fn get_record(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, EdgeError> {
    match state.kv.get(&id)? {
        // Stored values are already JSON, pass them through untouched.
        Some(raw) => Ok((
            [(header::CONTENT_TYPE, "application/json")],
            raw,
        )
            .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Not found"})),
        )
            .into_response()),
    }
}

async fn delete_record(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, EdgeError> {
    state.kv.delete(&id)?;
    remove_from_index(state.kv.as_ref(), &id)?;
    Ok(Json(json!({"success": true})))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
