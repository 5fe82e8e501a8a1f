//! OpenRPC Description Models
//!
//! This module contains the data structures of the API description document
//! the console fetches at startup. Only the parts the console relies on are
//! typed; everything else is ignored on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Constants
// =============================================================================

/// Tag summary whose name is the navigation group of an operation
pub const ROOT_LABEL_TAG: &str = "root_label";
/// Tag summary whose name is the prefix stripped from menu labels
pub const COMMAND_PREFIX_TAG: &str = "command_prefix";
/// Prefix of local schema references
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Named JSON-Schema fragments shared by the operations.
pub type SchemaIndex = Map<String, Value>;

// =============================================================================
// Description Models
// =============================================================================

/// The whole API description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenRpcDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openrpc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Value>,

    #[serde(default)]
    pub methods: Vec<OperationDescriptor>,

    #[serde(default)]
    pub components: Components,
}

/// Reusable definitions referenced from the operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: SchemaIndex,
}

/// One callable remote procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Unique name, also the JSON-RPC method id
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,

    /// Grouping metadata (`root_label`, `command_prefix`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    /// Result content descriptor, kept for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl OperationDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            summary: None,
            params: Vec::new(),
            tags: Vec::new(),
            result: None,
        }
    }

    /// Value of the tag whose summary is `key`.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.summary.as_deref() == Some(key))
            .map(|t| t.name.as_str())
    }
}

/// One operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON-Schema fragment describing the value
    #[serde(default)]
    pub schema: Value,

    /// Optional presentation hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<ParamUi>,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: None,
            schema,
            ui: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn widget(mut self, widget: impl Into<String>) -> Self {
        self.ui = Some(ParamUi {
            widget: Some(widget.into()),
        });
        self
    }
}

/// Presentation hint attached to a parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamUi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
}

/// `{name, summary}` pair; the summary is the key, the name the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Tag {
    pub fn new(summary: &str, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: Some(summary.to_string()),
        }
    }
}
