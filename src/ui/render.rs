//! Declarative UI interpreter.
//!
//! Walks a UI description supplied with a result, resolves bindings against
//! the data context and builds a `RenderedTree`. Rendering is a pure function
//! of `(node, context, registry)`.

use super::binding::{evaluate, DataContext};
use super::models::{RenderedTree, Resolved, ResolvedProps, UiNode};
use super::registry::ComponentRegistry;
use crate::error::RenderError;
use serde_json::Value;

/// Interprets `node`.
///
/// * A string renders verbatim.
/// * An element resolves its `type` through `registry` (unknown namespaced
///   references abort the pass), evaluates its props, then evaluates each
///   child as a binding candidate with `$item` bound to the child and
///   renders the outcome in that same scope.
/// * Anything else is dumped as opaque data.
pub fn render(
    node: &Value,
    context: &DataContext,
    registry: &ComponentRegistry,
) -> Result<RenderedTree, RenderError> {
    match UiNode::classify(node) {
        UiNode::Text(text) => Ok(RenderedTree::text(text)),
        UiNode::Element {
            component,
            props,
            children,
        } => {
            let component = registry.resolve(component)?;

            let props: ResolvedProps = props
                .iter()
                .map(|(name, value)| (name.clone(), evaluate(value, context)))
                .collect();

            let children = children
                .iter()
                .map(|child| render_child(child, context, registry))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(RenderedTree::Element {
                component,
                props,
                children,
            })
        }
        UiNode::Binding(_) | UiNode::Opaque(_) => Ok(RenderedTree::opaque(node.clone())),
    }
}

fn render_child(
    child: &Value,
    context: &DataContext,
    registry: &ComponentRegistry,
) -> Result<RenderedTree, RenderError> {
    let scoped = context.with_item(child.clone());
    match evaluate(child, &scoped) {
        Resolved::Value(value) => render(&value, &scoped, registry),
        Resolved::Missing(path) => {
            log::debug!("[UI] unresolved binding '{}'", path);
            Ok(RenderedTree::Missing { path })
        }
    }
}

/// Renders an operation result: a payload carrying both `ui` and `data` is
/// interpreted, anything else is dumped structurally.
pub fn render_result(payload: &Value, registry: &ComponentRegistry) -> Result<RenderedTree, RenderError> {
    match (payload.get("ui"), payload.get("data")) {
        (Some(ui), Some(data)) if !ui.is_null() && !data.is_null() => {
            render(ui, &DataContext::new(data.clone()), registry)
        }
        _ => Ok(RenderedTree::opaque(payload.clone())),
    }
}
