//! JSON-RPC Envelope Helpers
//!
//! Small pure functions to build response envelopes and to unwrap the body
//! of a successful HTTP exchange into a result or a `CallError`.

use super::models::{RpcError, RpcResponse, JSONRPC_VERSION};
use crate::error::CallError;
use serde_json::{json, Value};

/// Builds a JSON-RPC 2.0 success response.
///
/// The `id` is only echoed when the request carried one.
pub fn rpc_success(id: Option<Value>, result: Value) -> Value {
    let mut envelope = json!({
        "jsonrpc": JSONRPC_VERSION,
        "result": result,
    });
    if let Some(id) = id {
        envelope["id"] = id;
    }
    envelope
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier, echoed when present.
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
pub fn rpc_error(id: Option<Value>, code: i64, message: impl Into<String>) -> Value {
    let mut envelope = json!({
        "jsonrpc": JSONRPC_VERSION,
        "error": {
            "code": code,
            "message": message.into(),
        }
    });
    if let Some(id) = id {
        envelope["id"] = id;
    }
    envelope
}

/// Message used for any non-2xx HTTP status.
pub fn invalid_status(code: u16) -> CallError {
    CallError::transport(format!("Invalid HTTP status: {}", code))
}

/// Turns a parsed response body into the call outcome.
///
/// # Behaviour
///
/// * `unwrap == false` returns the body untouched.
/// * A JSON array is a batch: any entry with an `error` fails the whole call
///   with every error aggregated, otherwise the `result` of each entry is
///   returned in response order.
/// * A JSON object fails with its `error` if present, otherwise yields its
///   `result` (`null` when missing).
/// * Any other JSON value is a protocol error.
pub fn unwrap_response(body: Value, unwrap: bool) -> Result<Value, CallError> {
    if !unwrap {
        return Ok(body);
    }

    match body {
        Value::Array(entries) => {
            let responses = entries
                .into_iter()
                .map(parse_envelope)
                .collect::<Result<Vec<_>, _>>()?;

            let errors: Vec<RpcError> = responses
                .iter()
                .filter_map(|r| r.error.clone())
                .collect();
            if !errors.is_empty() {
                return Err(CallError::batch(errors));
            }

            Ok(Value::Array(
                responses
                    .into_iter()
                    .map(|r| r.result.unwrap_or(Value::Null))
                    .collect(),
            ))
        }
        body @ Value::Object(_) => {
            let response = parse_envelope(body)?;
            match response.error {
                Some(error) => Err(CallError::Rpc(error)),
                None => Ok(response.result.unwrap_or(Value::Null)),
            }
        }
        other => Err(CallError::protocol(format!(
            "Unexpected JSON-RPC response: {}",
            other
        ))),
    }
}

fn parse_envelope(entry: Value) -> Result<RpcResponse, CallError> {
    serde_json::from_value(entry)
        .map_err(|e| CallError::protocol(format!("Malformed JSON-RPC response: {}", e)))
}
