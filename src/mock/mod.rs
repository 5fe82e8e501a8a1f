//! Mock Backend Module
//!
//! A small JSON-RPC backend for local development and tests:
//! - Method names, operation inputs and canned replies (`models`)
//! - The built-in operations and the UI builders they use
//! - The OpenRPC description of those operations
//! - Route handlers and shared state

pub mod description;
pub mod handlers;
pub mod models;
pub mod operations;
pub mod state;

// Re-export commonly used types and functions
pub use handlers::routes;
pub use models::CannedReply;
pub use state::{AppState, SharedState};
