//! Mock backend route handlers
//!
//! A JSON-RPC 2.0 endpoint answering single requests and batches. Batch
//! responses keep the request order.

use super::description::description;
use super::models::*;
use super::operations::call_builtin;
use super::state::SharedState;
use crate::rpc::helpers::{rpc_error, rpc_success};
use crate::rpc::models::{RpcError, RpcRequest, INVALID_REQUEST, PARSE_ERROR};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::Value;

/// Creates routes for the JSON-RPC endpoint
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_jsonrpc))
        .route("/jsonrpc", post(handle_jsonrpc))
}

/// Endpoint: POST /jsonrpc
///
/// Only a body that is not JSON at all is a parse error (HTTP 400). A JSON
/// value that is not a request gets `Invalid Request`, per entry in a batch.
async fn handle_jsonrpc(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(e) => {
            log::warn!("[MOCK] JSON parse error: {}", e.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(None, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    let response_body = match payload {
        Value::Array(entries) if entries.is_empty() => {
            rpc_error(None, INVALID_REQUEST, "Invalid Request")
        }
        Value::Array(entries) => Value::Array(
            entries
                .into_iter()
                .map(|entry| handle_entry(&state, entry))
                .collect(),
        ),
        single => handle_entry(&state, single),
    };

    Json(response_body).into_response()
}

/// Answers one entry of the body, rejecting anything that is not a request.
fn handle_entry(state: &SharedState, entry: Value) -> Value {
    let id = entry.get("id").filter(|id| !id.is_null()).cloned();
    match serde_json::from_value::<RpcRequest>(entry) {
        Ok(request) => handle_request(state, request),
        Err(e) => {
            log::warn!("[MOCK] Invalid request: {}", e);
            rpc_error(id, INVALID_REQUEST, "Invalid Request")
        }
    }
}

/// Answers one request: canned reply first, then the description, then the
/// built-in operations.
pub fn handle_request(state: &SharedState, request: RpcRequest) -> Value {
    let RpcRequest {
        method, params, id, ..
    } = request;
    log::info!("[MOCK] Call: {} (id: {:?})", method, id);

    let outcome = match state.canned(&method) {
        Some(CannedReply::Result(result)) => Ok(result),
        Some(CannedReply::Error(error)) => Err(error),
        None if method == DESCRIPTION_METHOD => serde_json::to_value(description())
            .map_err(|e| RpcError::new(OPERATION_ERROR, e.to_string())),
        None => call_builtin(&method, params.unwrap_or(Value::Null)).unwrap_or_else(|| {
            log::warn!("[MOCK] Unknown method: {}", method);
            Err(RpcError::new(OPERATION_ERROR, UNKNOWN_METHOD))
        }),
    };

    match outcome {
        Ok(result) => rpc_success(id, result),
        Err(error) => error_envelope(id, error),
    }
}

fn error_envelope(id: Option<Value>, error: RpcError) -> Value {
    let mut envelope = rpc_error(id, error.code, error.message);
    if let Some(data) = error.data {
        envelope["error"]["data"] = data;
    }
    envelope
}
