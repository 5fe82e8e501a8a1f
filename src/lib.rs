//! RPC Console Library
//!
//! This library provides a generic operator console for JSON-RPC backends
//! described by an OpenRPC document, plus a mock backend for development.

// Core modules
pub mod console;
pub mod form;
pub mod openrpc;
pub mod rpc;
pub mod ui;

// Development backend
pub mod mock;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
