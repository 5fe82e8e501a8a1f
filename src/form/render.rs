//! Plain-text rendering of an input form.

use super::schema::{InputSchema, PresentationHints};
use serde_json::Value;

/// Lists the fields of `schema`: hinted order first, then any remaining
/// properties. Required fields are marked with `*`.
pub fn render_form(schema: &InputSchema, hints: &PresentationHints) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", schema.title));
    if let Some(description) = &schema.description {
        out.push_str(&format!("  {}\n", description));
    }

    let fields = field_order(schema, hints);
    if fields.is_empty() {
        out.push_str("  (no parameters)\n");
        return out;
    }

    let width = fields.iter().map(|f| f.len()).max().unwrap_or(0);
    for name in fields {
        let property = schema.property(name).cloned().unwrap_or(Value::Null);
        let marker = if schema.is_required(name) { '*' } else { ' ' };

        let mut details = vec![type_label(&property)];
        if let Some(widget) = hints.widget(name) {
            details.push(format!("widget: {}", widget));
        }
        if let Some(allowed) = property.get("enum").and_then(Value::as_array) {
            details.push(format!(
                "one of: {}",
                allowed
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        out.push_str(&format!(
            "{} {:<width$}  [{}]",
            marker,
            name,
            details.join("; "),
            width = width
        ));
        if let Some(description) = property.get("description").and_then(Value::as_str) {
            out.push_str(&format!("  {}", description));
        }
        out.push('\n');
    }
    out
}

fn field_order<'a>(schema: &'a InputSchema, hints: &'a PresentationHints) -> Vec<&'a str> {
    let mut fields: Vec<&str> = hints
        .order
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|name| schema.properties.contains_key(*name))
        .collect();
    for name in schema.properties.keys() {
        if !fields.contains(&name.as_str()) {
            fields.push(name);
        }
    }
    fields
}

fn type_label(property: &Value) -> String {
    match property.get("type") {
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("|"),
        _ => "any".to_string(),
    }
}
