//! Declarative UI Module
//!
//! This module interprets server-supplied UI descriptions:
//! - Node classification and the rendered tree (`models`)
//! - `$eval` binding resolution against a data context
//! - The component registry (primitives and widget libraries)
//! - The interpreter itself and a terminal presenter

pub mod binding;
pub mod models;
pub mod registry;
pub mod render;
pub mod text;

// Re-export commonly used types and functions
pub use binding::{resolve_binding, DataContext};
pub use models::{RenderedTree, Resolved, UiNode};
pub use registry::{Component, ComponentRegistry, WidgetKind};
pub use render::{render, render_result};
pub use text::to_text;
