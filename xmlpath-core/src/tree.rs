use serde::Serialize;

/// Index of a node inside an [`XmlDocument`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

/// A single attribute, kept in document order on its element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element stored in an [`XmlDocument`].
///
/// Children are owned through the document's arena; `parent` is a plain
/// back-reference used to walk towards the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNode {
    /// Local element name (namespace prefix stripped).
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Character content owned directly by this element.
    pub text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl XmlNode {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent,
        }
    }

    /// Child element ids in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The owning element, or `None` for the document root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// An immutable element tree backed by an arena.
///
/// The root element always lives at index 0. Nodes are appended in document
/// order, so arena order is also pre-order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
}

impl XmlDocument {
    /// Start a document containing only a root element named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            nodes: vec![XmlNode::new(name.into(), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document.
    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id.0]
    }

    /// Total number of elements in the document.
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append a new child element under `parent` and return its id.
    pub fn append_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(XmlNode::new(name.into(), Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn push_attribute(&mut self, id: NodeId, attribute: Attribute) {
        self.nodes[id.0].attributes.push(attribute);
    }

    /// Append character content to an element's text.
    pub fn push_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text.push_str(text);
    }

    /// Ids from `id` up to and including the root, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: Some(id),
        }
    }
}

/// Iterator over a node and its ancestors, see [`XmlDocument::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    doc: &'a XmlDocument,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).parent;
        Some(current)
    }
}
