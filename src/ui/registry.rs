//! Component registry.
//!
//! A bare `type` ("div", "h2") is a primitive element. A namespaced one
//! ("antd.Alert") must be registered under `(namespace, name)`; anything
//! else is an unknown component reference and fails the render pass.

use crate::error::RenderError;
use serde::Serialize;
use std::collections::HashMap;

/// Namespace of the built-in widget library.
pub const DEFAULT_NAMESPACE: &str = "antd";

/// Widgets the console knows how to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetKind {
    Alert,
    Card,
    Tag,
    Divider,
    Descriptions,
    List,
    Statistic,
    Table,
    /// Layout-only widget: renders its children
    Container,
}

/// A resolved `type` reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Component {
    Primitive {
        tag: String,
    },
    Widget {
        namespace: String,
        name: String,
        widget: WidgetKind,
    },
}

/// `(namespace, name) -> widget`, populated at startup.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    libraries: HashMap<String, HashMap<String, WidgetKind>>,
}

impl ComponentRegistry {
    /// A registry with no library at all; only primitives resolve.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry with the built-in `antd` widget set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register_library(
            DEFAULT_NAMESPACE,
            [
                ("Alert", WidgetKind::Alert),
                ("Card", WidgetKind::Card),
                ("Tag", WidgetKind::Tag),
                ("Divider", WidgetKind::Divider),
                ("Descriptions", WidgetKind::Descriptions),
                ("List", WidgetKind::List),
                ("Statistic", WidgetKind::Statistic),
                ("Table", WidgetKind::Table),
                ("Space", WidgetKind::Container),
                ("Row", WidgetKind::Container),
                ("Col", WidgetKind::Container),
                ("Typography", WidgetKind::Container),
            ],
        );
        registry
    }

    pub fn register(&mut self, namespace: &str, name: &str, widget: WidgetKind) -> &mut Self {
        self.libraries
            .entry(namespace.to_string())
            .or_default()
            .insert(name.to_string(), widget);
        self
    }

    pub fn register_library<'a>(
        &mut self,
        namespace: &str,
        widgets: impl IntoIterator<Item = (&'a str, WidgetKind)>,
    ) -> &mut Self {
        for (name, widget) in widgets {
            self.register(namespace, name, widget);
        }
        self
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.libraries.contains_key(namespace)
    }

    /// Resolves a `type` reference.
    pub fn resolve(&self, reference: &str) -> Result<Component, RenderError> {
        let unknown = || RenderError::UnknownComponent {
            reference: reference.to_string(),
        };

        match reference.split_once('.') {
            Some((namespace, name)) => self
                .libraries
                .get(namespace)
                .and_then(|library| library.get(name))
                .map(|&widget| Component::Widget {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                    widget,
                })
                .ok_or_else(unknown),
            None if is_tag_name(reference) => Ok(Component::Primitive {
                tag: reference.to_string(),
            }),
            None => Err(unknown()),
        }
    }
}

fn is_tag_name(reference: &str) -> bool {
    let mut chars = reference.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_tags_are_primitives() {
        let registry = ComponentRegistry::empty();
        assert_eq!(
            registry.resolve("h2"),
            Ok(Component::Primitive { tag: "h2".into() })
        );
        assert!(registry.resolve("").is_err());
        assert!(registry.resolve("<script>").is_err());
    }

    #[test]
    fn namespaced_references_need_registration() {
        let registry = ComponentRegistry::with_defaults();
        assert_eq!(
            registry.resolve("antd.Alert"),
            Ok(Component::Widget {
                namespace: "antd".into(),
                name: "Alert".into(),
                widget: WidgetKind::Alert,
            })
        );
        assert_eq!(
            registry.resolve("antd.Carousel"),
            Err(RenderError::UnknownComponent { reference: "antd.Carousel".into() })
        );
        assert!(registry.resolve("mui.Button").is_err());
    }

    #[test]
    fn custom_libraries_can_be_registered() {
        let mut registry = ComponentRegistry::empty();
        registry.register("ops", "Gauge", WidgetKind::Statistic);

        assert!(registry.has_namespace("ops"));
        assert!(matches!(
            registry.resolve("ops.Gauge"),
            Ok(Component::Widget { widget: WidgetKind::Statistic, .. })
        ));
    }
}
