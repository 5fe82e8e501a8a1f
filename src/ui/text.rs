//! Terminal presentation of a rendered tree.

use super::models::{RenderedTree, Resolved, ResolvedProps};
use super::registry::{Component, WidgetKind};
use serde_json::Value;

const BLOCK_TAGS: &[&str] = &[
    "div", "p", "section", "article", "header", "footer", "main", "nav", "aside", "form",
    "pre", "ul", "ol", "li", "table", "tr", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Marker printed in place of an unresolved binding.
pub fn missing_marker(path: &str) -> String {
    format!("<unresolved: {}>", path)
}

/// Pretty dump used by the opaque fallback: strings as-is, other values as
/// indented JSON.
pub fn dump(data: &Value) -> String {
    match data {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Renders `tree` as plain text.
pub fn to_text(tree: &RenderedTree) -> String {
    let mut writer = TextWriter::default();
    writer.tree(tree);
    writer.finish()
}

#[derive(Default)]
struct TextWriter {
    out: String,
}

impl TextWriter {
    fn finish(self) -> String {
        let trimmed = self.out.trim_end_matches('\n');
        format!("{}\n", trimmed)
    }

    fn newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn line(&mut self, text: &str) {
        self.newline();
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn tree(&mut self, tree: &RenderedTree) {
        match tree {
            RenderedTree::Text { text } => self.out.push_str(text),
            RenderedTree::Missing { path } => self.out.push_str(&missing_marker(path)),
            RenderedTree::Opaque { data } => self.line(&dump(data)),
            RenderedTree::Element {
                component,
                props,
                children,
            } => match component {
                Component::Primitive { tag } => self.primitive(tag, children),
                Component::Widget { widget, .. } => self.widget(*widget, props, children),
            },
        }
    }

    fn children(&mut self, children: &[RenderedTree]) {
        for child in children {
            self.tree(child);
        }
    }

    fn primitive(&mut self, tag: &str, children: &[RenderedTree]) {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let title = inline_text(children);
                let underline = if tag == "h1" { '=' } else { '-' };
                self.line(&title);
                self.line(&underline.to_string().repeat(title.chars().count().max(1)));
            }
            "li" => {
                self.newline();
                self.out.push_str("- ");
                self.children(children);
                self.newline();
            }
            "br" => self.out.push('\n'),
            "hr" => self.line("----"),
            tag if BLOCK_TAGS.contains(&tag) => {
                self.newline();
                self.children(children);
                self.newline();
            }
            _ => self.children(children),
        }
    }

    fn widget(&mut self, widget: WidgetKind, props: &ResolvedProps, children: &[RenderedTree]) {
        match widget {
            WidgetKind::Alert => {
                let level = prop_text(props, "type").unwrap_or_else(|| "info".to_string());
                let message = prop_text(props, "message").unwrap_or_default();
                self.line(&format!("[{}] {}", level.to_uppercase(), message));
                if let Some(description) = prop_text(props, "description") {
                    self.line(&description);
                }
                self.children(children);
                self.newline();
            }
            WidgetKind::Card | WidgetKind::Descriptions => {
                if let Some(title) = prop_text(props, "title") {
                    self.line(&format!("== {} ==", title));
                }
                self.newline();
                self.children(children);
                self.newline();
            }
            WidgetKind::Tag => {
                let label = match prop_text(props, "children") {
                    Some(label) => label,
                    None => inline_text(children),
                };
                self.out.push_str(&format!("[{}]", label));
            }
            WidgetKind::Divider => self.line("----"),
            WidgetKind::Statistic => {
                let title = prop_text(props, "title").unwrap_or_default();
                let value = prop_text(props, "value").unwrap_or_default();
                self.line(&format!("{}: {}", title, value));
            }
            WidgetKind::List => {
                self.newline();
                if let Some(Resolved::Value(Value::Array(items))) = props.get("dataSource") {
                    for item in items {
                        self.line(&format!("- {}", inline_value(item)));
                    }
                }
                for child in children {
                    self.out.push_str("- ");
                    self.tree(child);
                    self.newline();
                }
            }
            WidgetKind::Table => self.table(props),
            WidgetKind::Container => {
                self.children(children);
            }
        }
    }

    fn table(&mut self, props: &ResolvedProps) {
        let rows: &[Value] = match props.get("dataSource") {
            Some(Resolved::Value(Value::Array(rows))) => rows.as_slice(),
            Some(Resolved::Missing(path)) => {
                self.line(&missing_marker(path));
                return;
            }
            _ => &[],
        };

        // Explicit columns, or the keys of the first row.
        let columns: Vec<(String, String)> = match props.get("columns") {
            Some(Resolved::Value(Value::Array(columns))) => columns
                .iter()
                .filter_map(|c| {
                    let key = c.get("dataIndex").and_then(Value::as_str)?;
                    let title = c.get("title").and_then(Value::as_str).unwrap_or(key);
                    Some((title.to_string(), key.to_string()))
                })
                .collect(),
            _ => rows
                .first()
                .and_then(Value::as_object)
                .map(|row| row.keys().map(|k| (k.clone(), k.clone())).collect())
                .unwrap_or_default(),
        };

        self.line(
            &columns
                .iter()
                .map(|(title, _)| title.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        );
        for row in rows {
            self.line(
                &columns
                    .iter()
                    .map(|(_, key)| row.get(key).map(inline_value).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(" | "),
            );
        }
    }
}

fn prop_text(props: &ResolvedProps, name: &str) -> Option<String> {
    props.get(name).map(|resolved| match resolved {
        Resolved::Value(value) => inline_value(value),
        Resolved::Missing(path) => missing_marker(path),
    })
}

fn inline_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn inline_text(children: &[RenderedTree]) -> String {
    let mut writer = TextWriter::default();
    writer.children(children);
    writer.out.trim().replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::binding::DataContext;
    use crate::ui::registry::ComponentRegistry;
    use crate::ui::render::{render, render_result};
    use serde_json::json;

    fn text_of(ui: Value, data: Value) -> String {
        let tree = render(&ui, &DataContext::new(data), &ComponentRegistry::with_defaults()).unwrap();
        to_text(&tree)
    }

    #[test]
    fn jwt_layout_renders_sections() {
        let ui = json!({
            "type": "div",
            "props": { "className": "jwt-read-result" },
            "children": [
                { "type": "div", "props": {}, "children": [
                    { "type": "h2", "props": {}, "children": ["Header"] },
                    { "$eval": "header" }
                ]},
                { "type": "div", "props": {}, "children": [
                    { "type": "h2", "props": {}, "children": ["Payload"] },
                    { "$eval": "payload" }
                ]}
            ]
        });
        let text = text_of(ui, json!({ "header": { "alg": "HS256" }, "payload": { "sub": "me" } }));

        assert_eq!(
            text,
            "Header\n------\n{\n  \"alg\": \"HS256\"\n}\nPayload\n-------\n{\n  \"sub\": \"me\"\n}\n"
        );
    }

    #[test]
    fn alert_and_missing_marker() {
        let ui = json!({
            "type": "antd.Alert",
            "props": { "type": "error", "message": { "$eval": "error" } }
        });
        assert_eq!(text_of(ui.clone(), json!({ "error": "boom" })), "[ERROR] boom\n");
        assert_eq!(text_of(ui, json!({})), "[ERROR] <unresolved: error>\n");
    }

    #[test]
    fn table_uses_columns() {
        let ui = json!({
            "type": "antd.Table",
            "props": {
                "columns": [{ "title": "Start", "dataIndex": "start" }],
                "dataSource": { "$eval": "finds" }
            }
        });
        let text = text_of(ui, json!({ "finds": [{ "start": 0 }, { "start": 4 }] }));
        assert_eq!(text, "Start\n0\n4\n");
    }

    #[test]
    fn opaque_string_is_printed_verbatim() {
        let tree = render_result(&json!("the base64 result"), &ComponentRegistry::with_defaults()).unwrap();
        assert_eq!(to_text(&tree), "the base64 result\n");
    }
}
