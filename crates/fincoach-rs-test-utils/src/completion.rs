//! Canned chat-completion upstream for exercising the streaming client
//! against real HTTP transport with controlled chunk boundaries.

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use bytes::Bytes;
use futures_util::stream;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Render one SSE event carrying the given delta content.
pub fn sse_event(content: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({"choices": [{"delta": {"content": content}}]})
    )
}

/// Render a full SSE body: one event per fragment, then the DONE sentinel.
pub fn sse_body(fragments: &[&str]) -> String {
    let mut body: String = fragments.iter().map(|fragment| sse_event(fragment)).collect();
    body.push_str("data: [DONE]\n\n");
    body
}

async fn stream_chunks(State(chunks): State<Arc<Vec<Bytes>>>) -> Response {
    let parts = chunks.as_ref().clone();
    let body = Body::from_stream(stream::iter(
        parts.into_iter().map(Ok::<_, Infallible>),
    ));
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        body,
    )
        .into_response()
}

/// Spawn an ephemeral server whose `/chat/completions` answers with the
/// given byte chunks, delivered as separate body frames. Returns the bound
/// address; the server lives until the runtime shuts down.
pub async fn spawn_completion_server(chunks: Vec<Vec<u8>>) -> SocketAddr {
    let chunks: Arc<Vec<Bytes>> = Arc::new(chunks.into_iter().map(Bytes::from).collect());
    let app = Router::new()
        .route("/chat/completions", post(stream_chunks))
        .with_state(chunks);
    spawn(app).await
}

/// Spawn an ephemeral server whose `/chat/completions` answers with the
/// given error status and an empty body.
pub async fn spawn_failing_completion_server(status: u16) -> SocketAddr {
    let status = StatusCode::from_u16(status).expect("valid status");
    let app = Router::new().route(
        "/chat/completions",
        post(move || async move { status }),
    );
    spawn(app).await
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
