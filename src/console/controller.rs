//! Console controller
//!
//! Composition root of the console: loads the API description once, keeps
//! the active selection and its form, submits calls through a `CallSlot`
//! and hands results to the UI interpreter.

use crate::error::{ConsoleError, DescriptionError};
use crate::form::{
    parameters_to_json_schema, parameters_to_ui_schema, render_form, FormValues, InputSchema,
    PresentationHints,
};
use crate::openrpc::{MenuEntry, OpenRpcDocument, OperationDescriptor, OperationIndex};
use crate::rpc::{CallSlot, CallState, RpcClient, RpcRequest};
use crate::ui::{render_result, ComponentRegistry, RenderedTree};
use tokio::sync::watch;

// =============================================================================
// Selection
// =============================================================================

/// The operation picked by the operator and the form derived from it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub operation: OperationDescriptor,
    pub schema: InputSchema,
    pub hints: PresentationHints,
    pub values: FormValues,
}

impl Selection {
    fn new(operation: &OperationDescriptor, index: &OperationIndex) -> Self {
        Self {
            schema: parameters_to_json_schema(operation, index.schemas()),
            hints: parameters_to_ui_schema(operation),
            operation: operation.clone(),
            values: FormValues::new(),
        }
    }
}

// =============================================================================
// Console
// =============================================================================

pub struct Console {
    index: OperationIndex,
    registry: ComponentRegistry,
    slot: CallSlot,
    selection: Option<Selection>,
}

impl Console {
    /// Console over an already indexed description.
    pub fn new(client: RpcClient, index: OperationIndex) -> Self {
        Self {
            index,
            registry: ComponentRegistry::with_defaults(),
            slot: CallSlot::new(client),
            selection: None,
        }
    }

    /// Fetches the description through `client` and indexes it.
    ///
    /// Any call failure becomes `DescriptionUnavailable`, the blocking
    /// notice shown instead of the console.
    pub async fn load(client: RpcClient) -> Result<Self, ConsoleError> {
        let params = client.description_params();
        log::info!(
            "[CONSOLE] Loading description '{}' from {}",
            client.config().description_method,
            params.endpoint
        );

        let raw = client
            .execute(&params)
            .await
            .map_err(|e| ConsoleError::DescriptionUnavailable(e.to_string()))?;
        let document: OpenRpcDocument = serde_json::from_value(raw)
            .map_err(|e| DescriptionError::Malformed(e.to_string()))?;
        let index = OperationIndex::build(document)?;

        log::info!("[CONSOLE] {} operation(s) available", index.len());
        Ok(Self::new(client, index))
    }

    /// Replaces the component registry used to interpret results.
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn index(&self) -> &OperationIndex {
        &self.index
    }

    pub fn menu(&self) -> &[MenuEntry] {
        self.index.menu()
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Selects an operation. The previous form values are dropped and any
    /// call still running for the previous selection is abandoned.
    pub fn select(&mut self, name: &str) -> Result<&Selection, ConsoleError> {
        let operation = self
            .index
            .get(name)
            .ok_or_else(|| ConsoleError::UnknownOperation(name.to_string()))?;
        let selection = Selection::new(operation, &self.index);

        self.slot.detach();
        log::debug!("[CONSOLE] Selected {}", name);
        Ok(&*self.selection.insert(selection))
    }

    fn selected_mut(&mut self) -> Result<&mut Selection, ConsoleError> {
        self.selection.as_mut().ok_or(ConsoleError::NoSelection)
    }

    /// Sets one form field from its raw text.
    pub fn set_value(&mut self, field: &str, raw: &str) -> Result<(), ConsoleError> {
        let selection = self.selected_mut()?;
        selection.values.set(&selection.schema, field, raw)?;
        Ok(())
    }

    /// Applies `name=value` pairs to the active form.
    pub fn apply_pairs<'a>(
        &mut self,
        pairs: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ConsoleError> {
        let selection = self.selected_mut()?;
        selection.values.apply_pairs(&selection.schema, pairs)?;
        Ok(())
    }

    /// Text rendering of the active form.
    pub fn render_form(&self) -> Result<String, ConsoleError> {
        let selection = self.selection.as_ref().ok_or(ConsoleError::NoSelection)?;
        Ok(render_form(&selection.schema, &selection.hints))
    }

    /// Validates the form and calls the selected operation. `raw` keeps the
    /// whole response envelope instead of unwrapping it.
    ///
    /// Re-submitting unchanged values while the same request is running does
    /// not issue a second call.
    pub fn submit(&mut self, raw: bool) -> Result<(), ConsoleError> {
        let selection = self.selection.as_ref().ok_or(ConsoleError::NoSelection)?;
        let params = selection.values.validate(&selection.schema)?;

        let request = RpcRequest::new(selection.operation.name.as_str()).with_params(params);
        let mut call = self.slot.client().params(request);
        if raw {
            call = call.raw();
        }

        if self.slot.state().is_loading() {
            self.slot.update(call);
        } else {
            self.slot.issue(call);
        }
        Ok(())
    }

    pub fn state(&self) -> CallState {
        self.slot.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<CallState> {
        self.slot.subscribe()
    }

    /// Waits for the running call and interprets its outcome. `None` when
    /// nothing was submitted.
    pub async fn outcome(&self) -> Result<Option<RenderedTree>, ConsoleError> {
        let state = self.slot.settled().await;
        present(&state, &self.registry)
    }
}

/// Maps a call state to what the result panel shows.
pub fn present(
    state: &CallState,
    registry: &ComponentRegistry,
) -> Result<Option<RenderedTree>, ConsoleError> {
    match state {
        CallState::Idle | CallState::Loading => Ok(None),
        CallState::Success(data) => Ok(Some(render_result(data, registry)?)),
        CallState::Failure(error) => Err(error.clone().into()),
    }
}

/// Text listing of the navigation menu.
pub fn render_menu(menu: &[MenuEntry]) -> String {
    let mut out = String::new();
    for entry in menu {
        out.push_str(&entry.label);
        out.push('\n');
        for item in &entry.children {
            out.push_str(&format!("  {:<24} {}\n", item.label, item.key));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::{CallError, FormError};
    use crate::openrpc::{ParamDescriptor, Tag};
    use serde_json::json;

    fn console() -> Console {
        let mut echo = OperationDescriptor::new("text-echo");
        echo.params = vec![
            ParamDescriptor::new("value", json!({ "type": "string" })).required(),
            ParamDescriptor::new("times", json!({ "type": "integer" })),
        ];
        echo.tags = vec![Tag::new("root_label", "Text"), Tag::new("command_prefix", "text-")];

        let document = OpenRpcDocument {
            methods: vec![echo],
            ..Default::default()
        };
        let client = RpcClient::new(ClientConfig::default().with_endpoint("http://127.0.0.1:9/jsonrpc"));
        Console::new(client, OperationIndex::build(document).unwrap())
    }

    #[test]
    fn selection_builds_the_form() {
        let mut console = console();
        let selection = console.select("text-echo").unwrap();
        assert_eq!(selection.schema.required, vec!["value".to_string()]);
        assert_eq!(
            selection.hints.order,
            Some(vec!["value".to_string(), "times".to_string()])
        );

        assert!(matches!(
            console.select("nope"),
            Err(ConsoleError::UnknownOperation(_))
        ));
    }

    #[test]
    fn selection_change_drops_values() {
        let mut console = console();
        console.select("text-echo").unwrap();
        console.set_value("times", "3").unwrap();
        assert_eq!(console.selection().unwrap().values.get("times"), Some(&json!(3)));

        console.select("text-echo").unwrap();
        assert!(console.selection().unwrap().values.is_empty());
    }

    #[test]
    fn submit_requires_a_selection_and_required_fields() {
        let mut console = console();
        assert!(matches!(console.submit(false), Err(ConsoleError::NoSelection)));

        console.select("text-echo").unwrap();
        assert!(matches!(
            console.submit(false),
            Err(ConsoleError::Form(FormError::MissingRequired(_)))
        ));
        assert_eq!(console.state(), CallState::Idle);
    }

    #[test]
    fn present_routes_states() {
        let registry = ComponentRegistry::with_defaults();
        assert_eq!(present(&CallState::Loading, &registry).unwrap(), None);
        assert_eq!(
            present(&CallState::Success(json!("plain")), &registry).unwrap(),
            Some(RenderedTree::opaque(json!("plain")))
        );
        assert!(matches!(
            present(&CallState::Failure(CallError::transport("down")), &registry),
            Err(ConsoleError::Call(_))
        ));
    }

    #[test]
    fn menu_lists_groups() {
        let text = render_menu(console().menu());
        assert!(text.starts_with("Home\nText\n"));
        assert!(text.contains("Echo"));
    }
}
