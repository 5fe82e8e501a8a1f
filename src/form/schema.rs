//! Form Schema Translator
//!
//! Pure functions turning an operation descriptor into the JSON-Schema of its
//! input form plus ordering and widget hints.

use crate::openrpc::models::{OperationDescriptor, ParamDescriptor, SchemaIndex, SCHEMA_REF_PREFIX};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Nesting limit when inlining `$ref`s; deeper references are left as-is.
const MAX_REF_DEPTH: usize = 8;

// =============================================================================
// Translator Outputs
// =============================================================================

/// JSON-Schema object describing an operation's input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub schema_type: String,

    /// Parameter name -> schema fragment (with its description)
    pub properties: Map<String, Value>,

    /// Names of the required parameters, always keys of `properties`
    pub required: Vec<String>,
}

impl InputSchema {
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Field ordering and widget overrides for the form renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationHints {
    /// Declaration order; `None` means "no explicit order"
    pub order: Option<Vec<String>>,

    pub widget_overrides: BTreeMap<String, String>,
}

impl PresentationHints {
    pub fn widget(&self, name: &str) -> Option<&str> {
        self.widget_overrides.get(name).map(String::as_str)
    }

    /// The conventional UI-schema document:
    /// `{"ui:order": [...], "<field>": {"ui:widget": "..."}}`.
    pub fn to_ui_schema(&self) -> Value {
        let mut ui = Map::new();
        if let Some(order) = &self.order {
            ui.insert("ui:order".to_string(), json!(order));
        }
        for (name, widget) in &self.widget_overrides {
            ui.insert(name.clone(), json!({ "ui:widget": widget }));
        }
        Value::Object(ui)
    }
}

// =============================================================================
// Translation
// =============================================================================

/// Builds the input schema of `operation`.
///
/// Each property is the parameter description overlaid with its schema
/// fragment (fragment keys win). `$ref`s into `schemas` are inlined; with an
/// empty index fragments are used verbatim.
pub fn parameters_to_json_schema(operation: &OperationDescriptor, schemas: &SchemaIndex) -> InputSchema {
    let properties = operation.params.iter().fold(Map::new(), |mut acc, param| {
        acc.insert(param.name.clone(), property_schema(param, schemas));
        acc
    });

    let required = operation
        .params
        .iter()
        .filter(|p| p.required)
        .fold(Vec::<String>::new(), |mut acc, p| {
            if !acc.contains(&p.name) {
                acc.push(p.name.clone());
            }
            acc
        });

    InputSchema {
        title: operation.name.clone(),
        description: operation.description.clone(),
        schema_type: "object".to_string(),
        properties,
        required,
    }
}

/// Builds the presentation hints of `operation`.
pub fn parameters_to_ui_schema(operation: &OperationDescriptor) -> PresentationHints {
    let order = if operation.params.is_empty() {
        None
    } else {
        Some(operation.params.iter().map(|p| p.name.clone()).collect())
    };

    let widget_overrides = operation
        .params
        .iter()
        .filter_map(|p| {
            p.ui.as_ref()
                .and_then(|ui| ui.widget.clone())
                .map(|widget| (p.name.clone(), widget))
        })
        .collect();

    PresentationHints {
        order,
        widget_overrides,
    }
}

fn property_schema(param: &ParamDescriptor, schemas: &SchemaIndex) -> Value {
    let mut property = Map::new();
    if let Some(description) = &param.description {
        property.insert("description".to_string(), Value::String(description.clone()));
    }
    if let Value::Object(fragment) = resolve_refs(&param.schema, schemas, 0) {
        property.extend(fragment);
    }
    Value::Object(property)
}

/// Inlines `{"$ref": "#/components/schemas/<Name>"}` nodes found in `value`.
/// Sibling keys of a `$ref` are kept on top of the referenced schema.
/// Unknown references are left untouched.
pub fn resolve_refs(value: &Value, schemas: &SchemaIndex, depth: usize) -> Value {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix(SCHEMA_REF_PREFIX))
                .and_then(|name| schemas.get(name));

            match target {
                Some(target) if depth < MAX_REF_DEPTH => {
                    let mut resolved = match resolve_refs(target, schemas, depth + 1) {
                        Value::Object(resolved) => resolved,
                        other => return other,
                    };
                    for (key, sibling) in map.iter().filter(|(k, _)| k.as_str() != "$ref") {
                        resolved.insert(key.clone(), resolve_refs(sibling, schemas, depth));
                    }
                    Value::Object(resolved)
                }
                _ => Value::Object(
                    map.iter()
                        .map(|(k, v)| (k.clone(), resolve_refs(v, schemas, depth)))
                        .collect(),
                ),
            }
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|v| resolve_refs(v, schemas, depth))
                .collect(),
        ),
        other => other.clone(),
    }
}
