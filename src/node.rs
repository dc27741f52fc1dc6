//! Document tree: an append-only arena of nodes.
//!
//! Every node owns the ordered list of its children. The `parent` field is a
//! plain id, used by the renderer to look up context; it never keeps anything
//! alive and is never used to walk the tree.

/// Identifier of a node within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Grouping flavour of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    Bullet,
    Definition,
}

/// How a list item is marked when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemRole {
    #[default]
    Bullet,
    /// Key of a definition pair.
    Term,
    /// Value of a definition pair.
    Definition,
    /// Checklist entry.
    Task { checked: bool },
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
        /// Set on the second and later lines of a wrapped list item.
        continuation: bool,
    },
    List {
        kind: ListKind,
    },
    ListItem {
        role: ItemRole,
    },
    CodeBlock {
        language: String,
        code: String,
    },
    InlineCode {
        text: String,
    },
    Strong {
        text: String,
    },
    Link {
        text: String,
        url: String,
    },
    HorizontalRule,
}

/// A node in the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Parent node (None for root).
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
        }
    }

    /// Child ids in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A markdown document tree rooted at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    /// Children of `id`, or an empty slice for an unknown id.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Total node count, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been appended to the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Append a new node as the last child of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        debug_assert!((parent.0 as usize) < self.nodes.len(), "unknown parent");
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind, Some(parent)));
        if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
            parent_node.children.push(id);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> NodeKind {
        NodeKind::Paragraph {
            text: text.to_string(),
            continuation: false,
        }
    }

    #[test]
    fn new_document_has_only_root() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.kind(doc.root()), Some(&NodeKind::Document));
        assert_eq!(doc.parent(doc.root()), None);
        assert!(doc.children(doc.root()).is_empty());
    }

    #[test]
    fn append_keeps_insertion_order_and_parent() {
        let mut doc = Document::new();
        let a = doc.append(NodeId::ROOT, para("a"));
        let list = doc.append(NodeId::ROOT, NodeKind::List { kind: ListKind::Bullet });
        let item = doc.append(list, NodeKind::ListItem { role: ItemRole::Bullet });
        let b = doc.append(item, para("b"));

        assert_eq!(doc.children(NodeId::ROOT), &[a, list]);
        assert_eq!(doc.children(list), &[item]);
        assert_eq!(doc.parent(b), Some(item));
        assert_eq!(doc.parent(item), Some(list));
        assert_eq!(doc.parent(a), Some(NodeId::ROOT));
        assert!(!doc.is_empty());
        assert_eq!(doc.len(), 5);
    }

    #[test]
    fn unknown_id_is_harmless() {
        let doc = Document::new();
        assert!(doc.node(NodeId(42)).is_none());
        assert!(doc.children(NodeId(42)).is_empty());
        assert_eq!(doc.parent(NodeId(42)), None);
    }
}
