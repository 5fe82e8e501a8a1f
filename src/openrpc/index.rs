//! Operation index and navigation menu.
//!
//! Built once per loaded description with plain folds over the method list.

use super::models::{
    OpenRpcDocument, OperationDescriptor, SchemaIndex, COMMAND_PREFIX_TAG, ROOT_LABEL_TAG,
};
use crate::error::DescriptionError;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Key of the always-present landing entry.
pub const HOME_KEY: &str = "home";
pub const HOME_LABEL: &str = "Home";

/// Top-level navigation entry: the home entry or a group of operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

/// A selectable operation; `key` is the method name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
}

/// Operations of a loaded description, by name and by group.
#[derive(Debug, Clone, Default)]
pub struct OperationIndex {
    operations: Vec<OperationDescriptor>,
    by_name: HashMap<String, usize>,
    menu: Vec<MenuEntry>,
    schemas: SchemaIndex,
}

impl OperationIndex {
    /// Indexes `document`. Fails if two operations share a name.
    pub fn build(document: OpenRpcDocument) -> Result<Self, DescriptionError> {
        let by_name = document.methods.iter().enumerate().try_fold(
            HashMap::with_capacity(document.methods.len()),
            |mut acc, (position, operation)| {
                if acc.insert(operation.name.clone(), position).is_some() {
                    return Err(DescriptionError::DuplicateOperation(operation.name.clone()));
                }
                Ok(acc)
            },
        )?;

        let menu = create_menu(&document.methods);

        Ok(Self {
            operations: document.methods,
            by_name,
            menu,
            schemas: document.components.schemas,
        })
    }

    pub fn get(&self, name: &str) -> Option<&OperationDescriptor> {
        self.by_name.get(name).map(|&i| &self.operations[i])
    }

    /// Operations in description order.
    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub fn menu(&self) -> &[MenuEntry] {
        &self.menu
    }

    pub fn schemas(&self) -> &SchemaIndex {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Groups tagged operations by their `root_label`, groups sorted by label,
/// items in description order, after a leading home entry.
fn create_menu(operations: &[OperationDescriptor]) -> Vec<MenuEntry> {
    let groups = operations
        .iter()
        .filter_map(|op| op.tag_value(ROOT_LABEL_TAG).map(|group| (group, op)))
        .fold(
            BTreeMap::<&str, Vec<MenuItem>>::new(),
            |mut acc, (group, op)| {
                acc.entry(group).or_default().push(MenuItem {
                    key: op.name.clone(),
                    label: menu_label(&op.name, op.tag_value(COMMAND_PREFIX_TAG)),
                });
                acc
            },
        );

    std::iter::once(MenuEntry {
        key: HOME_KEY.to_string(),
        label: HOME_LABEL.to_string(),
        children: Vec::new(),
    })
    .chain(groups.into_iter().map(|(group, children)| MenuEntry {
        key: group.to_string(),
        label: group.to_string(),
        children,
    }))
    .collect()
}

/// Strips the command prefix (when the name carries it) and capitalizes the
/// first letter; the rest of the name is kept as-is.
pub fn menu_label(name: &str, command_prefix: Option<&str>) -> String {
    let short = command_prefix
        .and_then(|prefix| name.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(name);

    let mut chars = short.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
