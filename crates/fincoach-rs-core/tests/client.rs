//! End-to-end tests for the streaming client against a canned upstream.

use fincoach_rs_config::ModelConfig;
use fincoach_rs_core::{AdviceClient, AdviceError};
use fincoach_rs_test_utils::{
    spawn_completion_server, spawn_failing_completion_server, sse_body, sse_event,
};
use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use std::net::SocketAddr;

fn config_for(addr: SocketAddr) -> ModelConfig {
    ModelConfig::new(format!("http://{addr}"), "sk-test", "glm-4-flash")
}

/// Split a body into fixed-size byte chunks, deliberately ignoring line and
/// UTF-8 boundaries.
fn chunked(body: &str, size: usize) -> Vec<Vec<u8>> {
    body.as_bytes().chunks(size).map(<[u8]>::to_vec).collect()
}

#[tokio::test]
async fn fragments_arrive_in_upstream_order_across_chunk_boundaries() {
    let body = sse_body(&["Hello", ", ", "世界"]);
    let addr = spawn_completion_server(chunked(&body, 7)).await;
    let client = AdviceClient::new(config_for(addr)).expect("client");

    let mut stream = client.generate("plan my budget").await.expect("generate");
    let mut fragments = Vec::new();
    while let Some(fragment) = stream.next().await {
        fragments.push(fragment.expect("fragment"));
    }
    assert_eq!(fragments, vec!["Hello", ", ", "世界"]);
}

#[tokio::test]
async fn finish_assembles_the_full_response() {
    let body = sse_body(&["## Budget\n", "- save 20%\n", "- invest the rest"]);
    let addr = spawn_completion_server(vec![body.into_bytes()]).await;
    let client = AdviceClient::new(config_for(addr)).expect("client");

    let response = client
        .generate("plan my budget")
        .await
        .expect("generate")
        .finish()
        .await
        .expect("finish");
    assert_eq!(response, "## Budget\n- save 20%\n- invest the rest");
}

#[tokio::test]
async fn malformed_frames_do_not_abort_the_stream() {
    let body = format!(
        "{}data: {{broken\n{}data: [DONE]\n\n",
        sse_event("first"),
        sse_event("second")
    );
    let addr = spawn_completion_server(chunked(&body, 11)).await;
    let client = AdviceClient::new(config_for(addr)).expect("client");

    let mut stream = client.generate("anything").await.expect("generate");
    let mut fragments = Vec::new();
    while let Some(fragment) = stream.next().await {
        fragments.push(fragment.expect("fragment"));
    }
    assert_eq!(fragments, vec!["first", "second"]);
}

#[tokio::test]
async fn upstream_error_status_is_surfaced_without_streaming() {
    let addr = spawn_failing_completion_server(500).await;
    let client = AdviceClient::new(config_for(addr)).expect("client");

    let err = client.generate("anything").await.expect_err("must fail");
    assert!(matches!(err, AdviceError::Upstream { status: 500 }));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Bind and immediately drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = AdviceClient::new(config_for(addr)).expect("client");
    let err = client.generate("anything").await.expect_err("must fail");
    assert!(matches!(err, AdviceError::Transport(_)));
}
