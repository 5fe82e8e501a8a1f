//! Mock Backend State
//!
//! Holds the canned replies table. Built-in operations are answered by
//! `operations`; a canned reply registered under the same name wins.

use super::models::{CannedReply, CUSTOM_WIDGET};
use super::operations::custom_widget_sample;
use dashmap::DashMap;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between handlers
pub type SharedState = Arc<AppState>;

/// Core state of the mock backend
pub struct AppState {
    /// Canned replies, keyed by method name.
    /// DashMap allows tests to register replies while the server runs.
    pub mocks: DashMap<String, CannedReply>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates the state seeded with the sample declarative UI reply
    pub fn new() -> Self {
        let mocks = DashMap::new();
        mocks.insert(
            CUSTOM_WIDGET.to_string(),
            CannedReply::Result(custom_widget_sample()),
        );
        Self { mocks }
    }

    /// Registers (or replaces) a canned reply
    pub fn register(&self, method: impl Into<String>, reply: CannedReply) {
        self.mocks.insert(method.into(), reply);
    }

    pub fn canned(&self, method: &str) -> Option<CannedReply> {
        self.mocks.get(method).map(|entry| entry.value().clone())
    }
}
