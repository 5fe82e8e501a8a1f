//! Remote Call Client Module
//!
//! This module contains the JSON-RPC client side of the console:
//! - Wire models (requests, responses, errors) and `CallState`
//! - Envelope helpers and response unwrapping
//! - `RpcClient`, one HTTP exchange per call
//! - `CallSlot`, the cancellable state machine behind a result panel

pub mod client;
pub mod helpers;
pub mod models;
pub mod slot;

// Re-export commonly used types for convenience
pub use client::{CallParams, RpcClient};
pub use models::{CallState, RpcError, RpcPayload, RpcRequest};
pub use slot::CallSlot;
