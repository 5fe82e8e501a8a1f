//! API Description Module
//!
//! This module contains the OpenRPC-shaped description of the backend:
//! - Description models (operations, parameters, tags, shared schemas)
//! - The operation index and navigation menu built from them

pub mod index;
pub mod models;

// Re-export commonly used types for convenience
pub use index::{MenuEntry, MenuItem, OperationIndex};
pub use models::{OpenRpcDocument, OperationDescriptor, ParamDescriptor, SchemaIndex, Tag};
