//! Input Form Module
//!
//! This module turns operation descriptors into forms:
//! - The schema translator (`InputSchema`, `PresentationHints`)
//! - Operator value coercion and validation
//! - A plain-text form renderer

pub mod render;
pub mod schema;
pub mod values;

// Re-export commonly used types and functions
pub use render::render_form;
pub use schema::{parameters_to_json_schema, parameters_to_ui_schema, InputSchema, PresentationHints};
pub use values::FormValues;
