//! Built-in operations of the mock backend.
//!
//! Each operation takes the raw `params` value and returns the JSON-RPC
//! `result` or the error object to send back.

use super::models::*;
use crate::rpc::models::{RpcError, INVALID_PARAMS};
use base64::alphabet;
use base64::engine::general_purpose::{self, GeneralPurpose};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use uuid::Uuid;

/// URL-safe alphabet accepting both padded and unpadded input.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    general_purpose::PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// =============================================================================
// UI Builders
// =============================================================================

/// `{ "type": ..., "props": ..., "children": [...] }`
pub fn element(component: &str, props: Value, children: Vec<Value>) -> Value {
    let mut node = json!({ "type": component, "props": props });
    if !children.is_empty() {
        node["children"] = Value::Array(children);
    }
    node
}

/// `{ "$eval": path }`
pub fn eval(path: &str) -> Value {
    json!({ "$eval": path })
}

// =============================================================================
// Operations
// =============================================================================

/// Dispatches a built-in operation. `None` means the method is not built in.
pub fn call_builtin(method: &str, params: Value) -> Option<Result<Value, RpcError>> {
    let outcome = match method {
        BASE64_ENCODE => parse(params).map(base64_encode),
        BASE64_DECODE => parse(params).and_then(base64_decode),
        UUID_GENERATOR => Ok(uuid_generator()),
        JSON_FORMAT => parse(params).and_then(json_format),
        JWT_READ => parse(params).map(jwt_read),
        _ => return None,
    };
    Some(outcome)
}

fn parse<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    let params = if params.is_null() { json!({}) } else { params };
    serde_json::from_value(params)
        .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
}

fn operation_error(message: impl Into<String>) -> RpcError {
    RpcError::new(OPERATION_ERROR, message)
}

fn base64_encode(input: Base64EncodeInput) -> Value {
    let bytes = input.value.as_bytes();
    let encoded = match input.mode.unwrap_or_default() {
        Base64EncodingMode::Default => general_purpose::STANDARD.encode(bytes),
        Base64EncodingMode::Url => general_purpose::URL_SAFE.encode(bytes),
        Base64EncodingMode::UrlNoPadding => general_purpose::URL_SAFE_NO_PAD.encode(bytes),
    };
    Value::String(encoded)
}

fn base64_decode(input: Base64DecodeInput) -> Result<Value, RpcError> {
    let decoded = match input.mode.unwrap_or_default() {
        Base64DecodingMode::Default => general_purpose::STANDARD.decode(input.value.trim()),
        Base64DecodingMode::Url => URL_SAFE_LENIENT.decode(input.value.trim()),
    }
    .map_err(|_| operation_error(INVALID_BASE64))?;

    Ok(Value::String(String::from_utf8_lossy(&decoded).into_owned()))
}

fn uuid_generator() -> Value {
    Value::String(Uuid::new_v4().to_string())
}

fn json_format(input: ValueInput) -> Result<Value, RpcError> {
    let parsed: Value = serde_json::from_str(&input.value)
        .map_err(|e| operation_error(format!("Invalid JSON: {}", e)))?;
    serde_json::to_string_pretty(&parsed)
        .map(Value::String)
        .map_err(|e| operation_error(e.to_string()))
}

/// Decodes the header and payload of a JWT and describes how to show them.
/// Failures are reported through the UI (an error alert), not as an RPC
/// error.
fn jwt_read(input: ValueInput) -> Value {
    match decode_jwt(&input.value) {
        Ok((header, payload)) => json!({
            "ui": element("div", json!({ "className": "jwt-read-result" }), vec![
                element("div", json!({ "className": "jwt-read-result-header" }), vec![
                    element("h2", json!({}), vec![json!("Header")]),
                    eval("header"),
                ]),
                element("div", json!({ "className": "jwt-read-result-payload" }), vec![
                    element("h2", json!({}), vec![json!("Payload")]),
                    eval("payload"),
                ]),
            ]),
            "data": { "error": null, "header": header, "payload": payload },
        }),
        Err(error) => json!({
            "ui": element("div", json!({ "className": "jwt-read-result" }), vec![
                element("antd.Alert", json!({ "type": "error", "message": eval("error") }), vec![]),
            ]),
            "data": { "error": error, "header": null, "payload": null },
        }),
    }
}

fn decode_jwt(token: &str) -> Result<(Value, Value), String> {
    let mut segments = token.trim().split('.');
    let (Some(header), Some(payload)) = (segments.next(), segments.next()) else {
        return Err("A JWT needs at least a header and a payload".to_string());
    };
    Ok((decode_segment("header", header)?, decode_segment("payload", payload)?))
}

fn decode_segment(name: &str, segment: &str) -> Result<Value, String> {
    let bytes = URL_SAFE_LENIENT
        .decode(segment)
        .map_err(|e| format!("Invalid {} encoding: {}", name, e))?;
    serde_json::from_slice(&bytes).map_err(|e| format!("Invalid {} JSON: {}", name, e))
}

/// Canned declarative UI reply registered under `custom-widget`.
pub fn custom_widget_sample() -> Value {
    json!({
        "ui": element("div", json!({ "className": "custom-widget-wrapper" }), vec![
            element("div", json!({ "className": "custom-widget-header" }), vec![
                element("h2", json!({}), vec![json!("Header")]),
                eval("header"),
            ]),
            element("div", json!({ "className": "custom-widget-payload" }), vec![
                element("h2", json!({}), vec![json!("Payload")]),
                eval("payload"),
            ]),
        ]),
        "data": {
            "header": { "alg": "rs256", "kid": "the_key" },
            "payload": { "iss": "http://foo", "sub": "The Name" },
        },
    })
}
