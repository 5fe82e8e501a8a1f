//! Integration tests for the remote call client and the console
//!
//! These tests run real loopback servers and verify:
//! - Description loading, selection and submission through the console
//! - Response unwrapping (single, batch, non-2xx)
//! - That a superseded call never overwrites the newer one

use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rpc_console::config::ClientConfig;
use rpc_console::console::Console;
use rpc_console::error::{CallError, ConsoleError};
use rpc_console::mock::AppState;
use rpc_console::openrpc::{OpenRpcDocument, OperationDescriptor, OperationIndex};
use rpc_console::router::create_app_router;
use rpc_console::rpc::{CallSlot, CallState, RpcClient, RpcError, RpcRequest};
use rpc_console::ui::{to_text, ComponentRegistry, RenderedTree};

/// Serves `app` on an ephemeral loopback port.
async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Client pointed at the mock backend.
async fn mock_client() -> RpcClient {
    let addr = spawn(create_app_router(Arc::new(AppState::new()))).await;
    RpcClient::new(ClientConfig::default().with_endpoint(format!("http://{}/jsonrpc", addr)))
}

/// Backend answering `slow` after a delay and anything else immediately,
/// echoing the method name as the result.
async fn slow_client() -> RpcClient {
    async fn handler(Json(request): Json<Value>) -> Json<Value> {
        let method = request["method"].as_str().unwrap_or_default().to_string();
        if method == "slow" {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Json(json!({ "jsonrpc": "2.0", "result": method }))
    }

    let addr = spawn(Router::new().route("/jsonrpc", post(handler))).await;
    RpcClient::new(ClientConfig::default().with_endpoint(format!("http://{}/jsonrpc", addr)))
}

// =============================================================================
// Remote call client
// =============================================================================

#[tokio::test]
async fn test_single_call_unwraps_result() {
    let client = mock_client().await;
    let params = client.params(RpcRequest::new("base64-encode").with_params(json!({ "value": "hi" })));

    assert_eq!(client.call(&params).await, CallState::Success(json!("aGk=")));
}

#[tokio::test]
async fn test_single_call_error() {
    let client = mock_client().await;
    let params =
        client.params(RpcRequest::new("base64-decode").with_params(json!({ "value": "%%%" })));

    assert_eq!(
        client.call(&params).await,
        CallState::Failure(CallError::Rpc(RpcError::new(0, "Invalid base64")))
    );
}

#[tokio::test]
async fn test_batch_results_in_order() {
    let client = mock_client().await;
    let params = client.params(vec![
        RpcRequest::new("base64-encode").with_params(json!({ "value": "a" })),
        RpcRequest::new("base64-encode").with_params(json!({ "value": "b" })),
    ]);

    assert_eq!(
        client.call(&params).await,
        CallState::Success(json!(["YQ==", "Yg=="]))
    );
}

#[tokio::test]
async fn test_batch_errors_are_aggregated() {
    let client = mock_client().await;
    let params = client.params(vec![
        RpcRequest::new("base64-decode").with_params(json!({ "value": "%%%" })),
        RpcRequest::new("base64-encode").with_params(json!({ "value": "ok" })),
        RpcRequest::new("nope"),
    ]);

    let state = client.call(&params).await;
    let error = state.error().expect("batch should fail");
    assert_eq!(error.rpc_errors().len(), 2);
    assert_eq!(
        error.to_string(),
        "Invalid base64,\nunknown JSON-RPC method"
    );
}

#[tokio::test]
async fn test_raw_call_keeps_the_envelope() {
    let client = mock_client().await;
    let params = client
        .params(RpcRequest::new("base64-encode").with_params(json!({ "value": "hi" })))
        .raw();

    let state = client.call(&params).await;
    let body = state.data().expect("raw call should succeed");
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["result"], "aGk=");
}

#[tokio::test]
async fn test_non_success_status() {
    async fn teapot() -> (StatusCode, &'static str) {
        (StatusCode::IM_A_TEAPOT, "no")
    }
    let addr = spawn(Router::new().route("/jsonrpc", post(teapot))).await;
    let client =
        RpcClient::new(ClientConfig::default().with_endpoint(format!("http://{}/jsonrpc", addr)));

    let state = client.call(&client.params(RpcRequest::new("anything"))).await;
    assert_eq!(
        state,
        CallState::Failure(CallError::transport("Invalid HTTP status: 418"))
    );
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn test_superseded_call_never_writes() {
    let client = slow_client().await;
    let mut slot = CallSlot::new(client.clone());

    slot.issue(client.params(RpcRequest::new("slow")));
    assert_eq!(slot.state(), CallState::Loading);
    slot.issue(client.params(RpcRequest::new("fast")));

    assert_eq!(slot.settled().await, CallState::Success(json!("fast")));

    // Give the slow handler time to answer; its result must be ignored.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(slot.state(), CallState::Success(json!("fast")));
}

#[tokio::test]
async fn test_detached_slot_returns_to_idle() {
    let client = slow_client().await;
    let mut slot = CallSlot::new(client.clone());

    slot.issue(client.params(RpcRequest::new("slow")));
    slot.detach();
    assert_eq!(slot.state(), CallState::Idle);

    // The aborted call must not come back and write its result.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(slot.state(), CallState::Idle);
    assert_eq!(slot.settled().await, CallState::Idle);
}

// =============================================================================
// Console
// =============================================================================

#[tokio::test]
async fn test_console_loads_menu() {
    let console = Console::load(mock_client().await).await.unwrap();

    let labels: Vec<&str> = console.menu().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels[0], "Home");
    assert!(labels.contains(&"Encoding"));

    let encoding = console
        .menu()
        .iter()
        .find(|e| e.key == "Encoding")
        .unwrap();
    let items: Vec<&str> = encoding.children.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(items, vec!["Decode", "Encode"]);
}

#[tokio::test]
async fn test_console_unavailable_description() {
    let client =
        RpcClient::new(ClientConfig::default().with_endpoint("http://127.0.0.1:9/jsonrpc"));

    match Console::load(client).await {
        Err(ConsoleError::DescriptionUnavailable(_)) => {}
        other => panic!("expected DescriptionUnavailable, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_console_submit_plain_result() {
    let mut console = Console::load(mock_client().await).await.unwrap();
    console.select("base64-encode").unwrap();

    let form = console.render_form().unwrap();
    assert!(form.contains("DEFAULT, URL, URL_NO_PADDING"));

    console.apply_pairs(["value=hello", "mode=URL_NO_PADDING"]).unwrap();
    console.submit(false).unwrap();

    let tree = console.outcome().await.unwrap();
    assert_eq!(tree, Some(RenderedTree::opaque(json!("aGVsbG8"))));
}

#[tokio::test]
async fn test_console_submit_declarative_result() {
    let mut console = Console::load(mock_client().await).await.unwrap();
    console.select("custom-widget").unwrap();
    console.submit(false).unwrap();

    let tree = console.outcome().await.unwrap().expect("a result");
    let text = to_text(&tree);
    assert!(text.starts_with("Header\n------\n"));
    assert!(text.contains("\"sub\": \"The Name\""));
}

#[tokio::test]
async fn test_console_submit_failure() {
    let mut console = Console::load(mock_client().await).await.unwrap();
    console.select("base64-decode").unwrap();
    console.set_value("value", "%%%").unwrap();
    console.submit(false).unwrap();

    match console.outcome().await {
        Err(ConsoleError::Call(error)) => assert_eq!(error.to_string(), "Invalid base64"),
        other => panic!("expected a call failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_console_selection_change_abandons_running_call() {
    let document = OpenRpcDocument {
        methods: vec![OperationDescriptor::new("slow"), OperationDescriptor::new("fast")],
        ..Default::default()
    };
    let mut console = Console::new(slow_client().await, OperationIndex::build(document).unwrap())
        .with_registry(ComponentRegistry::empty());
    let mut transitions = console.subscribe();

    console.select("slow").unwrap();
    console.submit(false).unwrap();
    assert_eq!(*transitions.borrow_and_update(), CallState::Loading);

    console.select("fast").unwrap();
    assert_eq!(console.state(), CallState::Idle);
    assert_eq!(*transitions.borrow_and_update(), CallState::Idle);

    let outcome = tokio::time::timeout(Duration::from_secs(2), console.outcome())
        .await
        .expect("outcome should not wait on an abandoned call")
        .unwrap();
    assert_eq!(outcome, None);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(console.state(), CallState::Idle);

    console.submit(false).unwrap();
    assert_eq!(
        console.outcome().await.unwrap(),
        Some(RenderedTree::opaque(json!("fast")))
    );
}
