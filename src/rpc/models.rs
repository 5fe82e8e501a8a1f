//! JSON-RPC Wire Models and Call State
//!
//! This module contains the request/response envelopes exchanged with the
//! backend and the tri-state result exposed to the presentation layer.

use crate::error::CallError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Constants
// =============================================================================

/// Protocol version carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";
/// Invalid JSON was received by the server
pub const PARSE_ERROR: i64 = -32700;
/// The JSON sent is not a valid request object
pub const INVALID_REQUEST: i64 = -32600;
/// Invalid method parameters
pub const INVALID_PARAMS: i64 = -32602;

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

// =============================================================================
// Requests
// =============================================================================

/// Standard JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version (should be "2.0")
    #[serde(default = "default_version")]
    pub jsonrpc: String,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Request identifier. Batches are correlated by position, so the
    /// console never sets one itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_version(),
            method: method.into(),
            params: None,
            id: None,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }
}

/// What goes over the wire for one logical request: a single call or a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcPayload {
    Batch(Vec<RpcRequest>),
    Single(RpcRequest),
}

impl From<RpcRequest> for RpcPayload {
    fn from(request: RpcRequest) -> Self {
        Self::Single(request)
    }
}

impl From<Vec<RpcRequest>> for RpcPayload {
    fn from(requests: Vec<RpcRequest>) -> Self {
        Self::Batch(requests)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// JSON-RPC error object. Backends are not always strict about its shape so
/// both fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// The message, or the code when the backend sent no message.
    pub fn display_message(&self) -> String {
        if self.message.is_empty() {
            self.code.to_string()
        } else {
            self.message.clone()
        }
    }
}

/// Incoming JSON-RPC response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    #[serde(default)]
    pub result: Option<Value>,

    #[serde(default)]
    pub error: Option<RpcError>,
}

// =============================================================================
// Call State
// =============================================================================

/// Observable state of one logical request.
///
/// Transitions are `Idle -> Loading -> Success | Failure`; a terminal state
/// only changes when a new logical request supersedes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CallState {
    #[default]
    Idle,
    Loading,
    Success(Value),
    Failure(CallError),
}

impl CallState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CallError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Result<Value, CallError>> for CallState {
    fn from(outcome: Result<Value, CallError>) -> Self {
        match outcome {
            Ok(data) => Self::Success(data),
            Err(error) => Self::Failure(error),
        }
    }
}
