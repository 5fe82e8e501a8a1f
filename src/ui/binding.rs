//! Data bindings: `$eval` path resolution against a data context.
//!
//! Paths are dotted accessors with optional bracket segments
//! (`a.b.0.c`, `a.b[0].c`, `a["key.with.dots"]`). Resolution never fails:
//! a segment that does not exist yields `Resolved::Missing`.

use super::models::{Resolved, UiNode, ITEM_BINDING};
use serde_json::Value;

/// Values a binding may refer to: the result data seed and, while a child is
/// being evaluated, the transient `$item`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataContext {
    data: Value,
    item: Option<Value>,
}

impl DataContext {
    pub fn new(data: Value) -> Self {
        Self { data, item: None }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn item(&self) -> Option<&Value> {
        self.item.as_ref()
    }

    /// A copy of this context with `$item` bound to `item`.
    pub fn with_item(&self, item: Value) -> Self {
        Self {
            data: self.data.clone(),
            item: Some(item),
        }
    }
}

/// Splits a path expression into segments.
pub fn parse_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let mut inner = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    inner.push(c);
                }
                let inner = inner.trim();
                let unquoted = inner
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
                    .unwrap_or(inner);
                if !unquoted.is_empty() {
                    segments.push(unquoted.to_string());
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Resolves `path` inside `context`.
pub fn resolve_binding(path: &str, context: &DataContext) -> Resolved {
    let segments = parse_path(path);
    let Some((first, rest)) = segments.split_first() else {
        return Resolved::Missing(path.to_string());
    };

    let (root, rest) = match (first.as_str(), context.item()) {
        (ITEM_BINDING, Some(item)) => (item, rest),
        _ => (context.data(), segments.as_slice()),
    };

    rest.iter()
        .try_fold(root, step)
        .map(|value| Resolved::Value(value.clone()))
        .unwrap_or_else(|| Resolved::Missing(path.to_string()))
}

/// Evaluates a prop or child: binding nodes are resolved, any other value
/// passes through unchanged.
pub fn evaluate(value: &Value, context: &DataContext) -> Resolved {
    match UiNode::binding_path(value) {
        Some(path) => resolve_binding(path, context),
        None => Resolved::Value(value.clone()),
    }
}

fn step<'a>(current: &'a Value, segment: &String) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> DataContext {
        DataContext::new(json!({ "a": { "b": [{ "c": 1 }, { "c": 2 }] }, "n": null }))
    }

    #[test]
    fn nested_paths_resolve() {
        assert_eq!(resolve_binding("a.b.0.c", &context()), Resolved::Value(json!(1)));
        assert_eq!(resolve_binding("a.b[1].c", &context()), Resolved::Value(json!(2)));
        assert_eq!(resolve_binding("a.b", &context()).value().unwrap()[0]["c"], 1);
        assert_eq!(resolve_binding("n", &context()), Resolved::Value(Value::Null));
    }

    #[test]
    fn missing_segments_yield_marker() {
        assert_eq!(
            resolve_binding("a.b.9.c", &context()),
            Resolved::Missing("a.b.9.c".into())
        );
        assert!(resolve_binding("a.b.x", &context()).is_missing());
        assert!(resolve_binding("a.b.0.c.d", &context()).is_missing());
        assert!(resolve_binding("", &context()).is_missing());
    }

    #[test]
    fn item_binding_takes_precedence() {
        let scoped = context().with_item(json!({ "label": "hello" }));
        assert_eq!(resolve_binding("$item.label", &scoped), Resolved::Value(json!("hello")));
        assert_eq!(resolve_binding("$item", &scoped), Resolved::Value(json!({ "label": "hello" })));
        // without an item, `$item` is looked up in the data like any key
        assert!(resolve_binding("$item.label", &context()).is_missing());
    }

    #[test]
    fn bracket_segments_allow_dotted_keys() {
        let ctx = DataContext::new(json!({ "x": { "k.1": true } }));
        assert_eq!(parse_path(r#"x["k.1"]"#), vec!["x".to_string(), "k.1".to_string()]);
        assert_eq!(resolve_binding("x['k.1']", &ctx), Resolved::Value(json!(true)));
    }

    #[test]
    fn evaluate_passes_literals_through() {
        assert_eq!(evaluate(&json!("plain"), &context()), Resolved::Value(json!("plain")));
        assert_eq!(evaluate(&json!({ "$eval": "a.b.1.c" }), &context()), Resolved::Value(json!(2)));
    }
}
