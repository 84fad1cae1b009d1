//! Form definitions as they arrive from the form-definition store.
//!
//! A definition is a nested JSON document:
//!
//! ```json
//! {
//!   "key": "root",
//!   "style": { "width_unit": "fill", "axis": "column" },
//!   "children": [
//!     { "key": "title", "is_element": true, "widget": "text",
//!       "style": { "width_unit": "fit" } }
//!   ]
//! }
//! ```
//!
//! Loading flattens it into a [`FormTree`] arena.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ElementData, FormTree, NodeId, NodeKind, StyleFields};

/// One node of a nested form definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Unique key of the node.
    pub key: String,

    /// Leaf element flag; containers leave it unset.
    #[serde(default, alias = "isElement")]
    pub is_element: bool,

    /// Widget type for elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,

    /// Raw style record (desktop fields plus `mobile_` overrides).
    #[serde(default)]
    pub style: StyleFields,

    /// Interactive actions attached to the node.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,

    /// Child nodes, containers only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDefinition>,
}

/// Errors raised while materializing a form definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The document is not valid JSON or does not match the definition shape.
    #[error("malformed form definition: {0}")]
    Json(#[from] serde_json::Error),

    /// Two nodes share a key.
    #[error("duplicate node key '{0}'")]
    DuplicateKey(String),

    /// An element declares children; only containers may.
    #[error("element '{0}' cannot have children")]
    ElementWithChildren(String),
}

impl FormTree {
    /// Parse a JSON form definition and build the tree.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] if the JSON is malformed, keys repeat, or
    /// an element declares children.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: NodeDefinition = serde_json::from_str(json)?;
        Self::from_definition(&definition)
    }

    /// Build a tree whose root is `definition`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] if keys repeat or an element declares
    /// children.
    pub fn from_definition(definition: &NodeDefinition) -> Result<Self, DefinitionError> {
        let mut tree = Self::new();
        let mut seen = HashSet::new();

        check_node(definition, &mut seen)?;
        if let Some(root) = tree.get_mut(NodeId::ROOT) {
            root.key.clone_from(&definition.key);
            root.kind = kind_of(definition);
            root.style = definition.style.clone();
            root.actions = definition.actions.clone();
        }
        for child in &definition.children {
            build(&mut tree, NodeId::ROOT, child, &mut seen)?;
        }
        Ok(tree)
    }

    /// Convert a subtree back into its nested definition.
    #[must_use]
    pub fn to_definition(&self, id: NodeId) -> Option<NodeDefinition> {
        let node = self.get(id)?;
        let (is_element, widget) = match &node.kind {
            NodeKind::Container => (false, None),
            NodeKind::Element(data) => (true, Some(data.widget.clone())),
        };
        Some(NodeDefinition {
            key: node.key.clone(),
            is_element,
            widget,
            style: node.style.clone(),
            actions: node.actions.clone(),
            children: node
                .children
                .iter()
                .filter_map(|&child| self.to_definition(child))
                .collect(),
        })
    }
}

fn kind_of(definition: &NodeDefinition) -> NodeKind {
    if definition.is_element {
        NodeKind::Element(ElementData {
            widget: definition.widget.clone().unwrap_or_default(),
        })
    } else {
        NodeKind::Container
    }
}

fn check_node(
    definition: &NodeDefinition,
    seen: &mut HashSet<String>,
) -> Result<(), DefinitionError> {
    if !seen.insert(definition.key.clone()) {
        return Err(DefinitionError::DuplicateKey(definition.key.clone()));
    }
    if definition.is_element && !definition.children.is_empty() {
        return Err(DefinitionError::ElementWithChildren(definition.key.clone()));
    }
    Ok(())
}

fn build(
    tree: &mut FormTree,
    parent: NodeId,
    definition: &NodeDefinition,
    seen: &mut HashSet<String>,
) -> Result<(), DefinitionError> {
    check_node(definition, seen)?;

    let id = tree.alloc(definition.key.clone(), kind_of(definition));
    if let Some(node) = tree.get_mut(id) {
        node.style = definition.style.clone();
        node.actions = definition.actions.clone();
    }
    tree.append_child(parent, id);

    for child in &definition.children {
        build(tree, id, child, seen)?;
    }
    Ok(())
}
