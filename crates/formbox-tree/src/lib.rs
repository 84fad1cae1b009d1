//! Form node tree for the formbox layout engine.
//!
//! This crate provides an arena-based tree of *containers* and *elements*
//! as authored in a form definition.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. A node's
//! parent is stored as an index, never as an owning reference: ownership flows
//! strictly from the arena, and walking up to the root is a chain of index
//! lookups.

pub mod definition;
pub mod fields;

pub use definition::{DefinitionError, NodeDefinition};
pub use fields::StyleFields;

/// A type-safe index into the form tree.
///
/// NodeId provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root container is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the form tree.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// Author-facing identity, unique within a tree.
    pub key: String,

    /// Whether this node is a structural container or a leaf element.
    pub kind: NodeKind,

    /// Raw style record covering both viewport variants.
    pub style: StyleFields,

    /// Interactive actions attached to this node (click handlers, navigation, ...).
    pub actions: Vec<String>,

    /// Parent container, `None` for the root (and for detached nodes).
    pub parent: Option<NodeId>,

    /// Ordered children. Always empty for elements.
    pub children: Vec<NodeId>,

    /// The node immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    /// Whether this node is a leaf element.
    #[must_use]
    pub const fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    /// Whether this node carries at least one interactive action.
    #[must_use]
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// The two kinds of form nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A structural box that arranges children along its flow axis.
    Container,
    /// A leaf widget (text, input, button, ...). Elements have no inner box.
    Element(ElementData),
}

/// Element-specific data.
///
/// NOTE: We only store the widget name. Widget configuration (labels, bindings,
/// validation) belongs to the form-definition store, not to layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementData {
    /// Widget type name, e.g. `text`, `input`, `button`.
    pub widget: String,
}

/// Arena-based form tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by NodeId
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct FormTree {
    /// All nodes in the tree, indexed by NodeId.
    /// The root container is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
}

impl FormTree {
    /// Create a new tree with just an empty root container.
    #[must_use]
    pub fn new() -> Self {
        FormTree {
            nodes: vec![Self::blank("root".to_string(), NodeKind::Container)],
        }
    }

    fn blank(key: String, kind: NodeKind) -> Node {
        Node {
            key,
            kind,
            style: StyleFields::new(),
            actions: Vec::new(),
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }

    /// Get the root container ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (should always hold at least the root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, key: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Self::blank(key.into(), kind));
        id
    }

    /// Allocate a detached container with the given style.
    pub fn alloc_container(&mut self, key: impl Into<String>, style: StyleFields) -> NodeId {
        let id = self.alloc(key, NodeKind::Container);
        self.nodes[id.0].style = style;
        id
    }

    /// Allocate a detached element with the given widget name and style.
    pub fn alloc_element(
        &mut self,
        key: impl Into<String>,
        widget: impl Into<String>,
        style: StyleFields,
    ) -> NodeId {
        let id = self.alloc(
            key,
            NodeKind::Element(ElementData {
                widget: widget.into(),
            }),
        );
        self.nodes[id.0].style = style;
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    ///
    /// Elements never own children; appending under an element is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[parent.0].is_element() {
            return;
        }

        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].next_sibling = None;
        self.nodes[child.0].prev_sibling = prev_last_child;

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }
    }

    /// Inserts `child` into `parent` immediately before `reference`.
    ///
    /// A `reference` that is not a child of `parent` appends instead.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference);
        let Some(index) = position else {
            self.append_child(parent, child);
            return;
        };
        if self.nodes[parent.0].is_element() {
            return;
        }

        let prev = index
            .checked_sub(1)
            .map(|i| self.nodes[parent.0].children[i]);
        let next = self.nodes[parent.0].children[index];

        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].prev_sibling = prev;
        self.nodes[child.0].next_sibling = Some(next);
        self.nodes[next.0].prev_sibling = Some(child);
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }
    }

    /// Removes `child` from `parent`, leaving it allocated but detached.
    ///
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(index) = self.nodes[parent.0].children.iter().position(|&c| c == child) else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(index);

        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        self.nodes[child.0].parent = None;

        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over a subtree in pre-order (the node itself first).
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: vec![id],
        }
    }

    /// Whether the node has no parent.
    #[must_use]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.parent(id).is_none()
    }

    /// Whether the node is a leaf element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Style record of a node.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<&StyleFields> {
        self.get(id).map(|n| &n.style)
    }

    /// Find an attached node by its key.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&id| self.get(id).is_some_and(|n| n.key == key))
    }
}

impl Default for FormTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a FormTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a FormTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
