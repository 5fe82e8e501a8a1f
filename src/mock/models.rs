//! Mock Backend Models and Constants
//!
//! This module contains the method names, operation inputs and canned reply
//! type of the development backend.

use crate::rpc::models::RpcError;
use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// Constants
// =============================================================================

/// Method returning the API description
pub const DESCRIPTION_METHOD: &str = "openrpc";
pub const BASE64_ENCODE: &str = "base64-encode";
pub const BASE64_DECODE: &str = "base64-decode";
pub const UUID_GENERATOR: &str = "uuid-generator";
pub const JSON_FORMAT: &str = "json-format";
pub const JWT_READ: &str = "jwt-read";
pub const CUSTOM_WIDGET: &str = "custom-widget";

/// Error code used by the backend for business failures
pub const OPERATION_ERROR: i64 = 0;
pub const INVALID_BASE64: &str = "Invalid base64";
pub const UNKNOWN_METHOD: &str = "unknown JSON-RPC method";

// =============================================================================
// Canned Replies
// =============================================================================

/// A fixed answer registered for a method name.
#[derive(Debug, Clone, PartialEq)]
pub enum CannedReply {
    Result(Value),
    Error(RpcError),
}

// =============================================================================
// Operation Inputs
// =============================================================================

/// Base64 alphabet/padding for encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Base64EncodingMode {
    #[default]
    Default,
    Url,
    UrlNoPadding,
}

/// Base64 alphabet for decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Base64DecodingMode {
    #[default]
    Default,
    Url,
}

/// Input for base64-encode
#[derive(Debug, Deserialize)]
pub struct Base64EncodeInput {
    #[serde(default)]
    pub mode: Option<Base64EncodingMode>,
    pub value: String,
}

/// Input for base64-decode
#[derive(Debug, Deserialize)]
pub struct Base64DecodeInput {
    #[serde(default)]
    pub mode: Option<Base64DecodingMode>,
    pub value: String,
}

/// Input of operations taking a single text value
#[derive(Debug, Deserialize)]
pub struct ValueInput {
    pub value: String,
}
