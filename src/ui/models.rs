//! Declarative UI Models
//!
//! This module contains the shapes the interpreter reads (`UiNode`, a view
//! over server-supplied JSON) and the tree it produces (`RenderedTree`).

use super::registry::Component;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// =============================================================================
// Constants
// =============================================================================

/// Key of a binding node: `{ "$eval": "path.to.value" }`
pub const EVAL_KEY: &str = "$eval";
/// Transient binding to the child being evaluated
pub const ITEM_BINDING: &str = "$item";

// =============================================================================
// Input Nodes
// =============================================================================

/// Classification of one JSON value of a UI description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiNode<'a> {
    /// Rendered verbatim
    Text(&'a str),

    /// `{ "$eval": path }`, resolved against the data context
    Binding(&'a str),

    /// `{ "type": ..., "props": {...}, "children": [...] }`
    Element {
        component: &'a str,
        props: &'a Map<String, Value>,
        children: &'a [Value],
    },

    /// Anything else; only ever dumped
    Opaque(&'a Value),
}

impl<'a> UiNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(map) => {
                if let (Some(Value::String(component)), Some(Value::Object(props))) =
                    (map.get("type"), map.get("props"))
                {
                    let children = match map.get("children") {
                        Some(Value::Array(children)) => children.as_slice(),
                        Some(Value::Null) | None => &[],
                        Some(single) => std::slice::from_ref(single),
                    };
                    return Self::Element {
                        component,
                        props,
                        children,
                    };
                }
                match map.get(EVAL_KEY) {
                    Some(Value::String(path)) => Self::Binding(path),
                    _ => Self::Opaque(value),
                }
            }
            _ => Self::Opaque(value),
        }
    }

    /// The binding path when `value` is a binding node.
    pub fn binding_path(value: &'a Value) -> Option<&'a str> {
        match Self::classify(value) {
            Self::Binding(path) => Some(path),
            _ => None,
        }
    }
}

// =============================================================================
// Output Tree
// =============================================================================

/// Outcome of resolving a binding or passing a literal through.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolved {
    Value(Value),
    /// The path does not exist in the data context
    Missing(String),
}

impl Resolved {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/// Props of a rendered element after binding resolution.
pub type ResolvedProps = BTreeMap<String, Resolved>;

/// Result of interpreting a UI description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderedTree {
    Text {
        text: String,
    },
    /// Inline marker for a binding that did not resolve
    Missing {
        path: String,
    },
    /// Structured dump of data the interpreter does not understand
    Opaque {
        data: Value,
    },
    Element {
        component: Component,
        props: ResolvedProps,
        children: Vec<RenderedTree>,
    },
}

impl RenderedTree {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn opaque(data: Value) -> Self {
        Self::Opaque { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_each_node_shape() {
        assert_eq!(UiNode::classify(&json!("hi")), UiNode::Text("hi"));
        assert_eq!(UiNode::classify(&json!({ "$eval": "a.b" })), UiNode::Binding("a.b"));

        let element = json!({ "type": "div", "props": {}, "children": ["x"] });
        match UiNode::classify(&element) {
            UiNode::Element { component, props, children } => {
                assert_eq!(component, "div");
                assert!(props.is_empty());
                assert_eq!(children, &[json!("x")]);
            }
            other => panic!("expected element, got {:?}", other),
        }

        // `type` without `props` is just data
        let data = json!({ "type": "div" });
        assert_eq!(UiNode::classify(&data), UiNode::Opaque(&data));
        let number = json!(3);
        assert_eq!(UiNode::classify(&number), UiNode::Opaque(&number));
    }
}
