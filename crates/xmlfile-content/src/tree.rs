//! Owned XML document tree
//!
//! A [`Document`] wraps a `xot` arena plus the prolog values `xot` does not
//! model. Handles returned by queries never own anything and turn "null"
//! once the node they point at is removed; removed subtrees are detached
//! rather than freed so a stale handle can never alias a recycled slot.

use crate::codec::{QuickXmlCodec, XmlCodec, XmlDeclaration};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use xot::{Value, Xot};

static NEXT_DOCUMENT: AtomicUsize = AtomicUsize::new(0);

/// Handle to a node inside a [`Document`].
///
/// Handles carry the identity of the document that issued them, so a handle
/// from another document is simply not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    document: usize,
    node: xot::Node,
}

impl NodeId {
    pub(crate) fn node(self) -> xot::Node {
        self.node
    }
}

/// The kind of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The document node holding the root element and any prolog nodes.
    Document,
    Element,
    /// Character data. CDATA sections load as text.
    Text,
    Comment,
    /// Processing instruction; the node name is its target.
    ProcessingInstruction,
    /// Only produced by queries such as `//item/@id`.
    Attribute,
}

impl NodeKind {
    /// Whether this kind carries only character data and no children.
    pub fn is_text_only(self) -> bool {
        !matches!(self, Self::Document | Self::Element)
    }
}

/// An XML document: a document node owning at most one root element.
#[derive(Debug, Clone)]
pub struct Document {
    id: usize,
    xot: Xot,
    root: xot::Node,
    removed: HashSet<xot::Node>,
    declaration: Option<XmlDeclaration>,
    doctype: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// Create a document containing only the document node.
    pub fn empty() -> Self {
        let mut xot = Xot::new();
        // Merging adjacent text would silently invalidate handles.
        xot.set_text_consolidation(false);
        let root = xot.new_document();
        Self {
            id: NEXT_DOCUMENT.fetch_add(1, Ordering::Relaxed),
            xot,
            root,
            removed: HashSet::new(),
            declaration: None,
            doctype: None,
        }
    }

    /// Create a document with a single empty root element.
    pub fn new(root_name: &str) -> Result<Self> {
        let mut doc = Self::empty();
        let root = doc.create_element(root_name)?;
        doc.append_child(doc.document_node(), root)?;
        Ok(doc)
    }

    /// Parse XML text with the default codec.
    pub fn parse(source: &str) -> Result<Self> {
        QuickXmlCodec::default().parse(source)
    }

    /// Render to XML text with the default codec.
    pub fn render(&self) -> Result<String> {
        QuickXmlCodec::default().render(self)
    }

    /// The underlying arena, for query evaluation.
    pub(crate) fn xot(&self) -> &Xot {
        &self.xot
    }

    pub(crate) fn handle(&self, node: xot::Node) -> NodeId {
        NodeId {
            document: self.id,
            node,
        }
    }

    /// The document node. Absolute paths start here.
    pub fn document_node(&self) -> NodeId {
        self.handle(self.root)
    }

    /// The root element, if the document has one.
    pub fn root_element(&self) -> Option<NodeId> {
        self.xot
            .children(self.root)
            .find(|c| self.xot.is_element(*c))
            .map(|c| self.handle(c))
    }

    pub fn declaration(&self) -> Option<&XmlDeclaration> {
        self.declaration.as_ref()
    }

    pub fn set_declaration(&mut self, declaration: Option<XmlDeclaration>) {
        self.declaration = declaration;
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub fn set_doctype(&mut self, doctype: Option<String>) {
        self.doctype = doctype;
    }

    /// Borrow a node. Returns `None` for removed or foreign handles.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.contains(id).then_some(NodeRef { doc: self, id })
    }

    /// Whether `id` refers to a live node of this document.
    pub fn contains(&self, id: NodeId) -> bool {
        id.document == self.id && !self.removed.contains(&self.xot.root(id.node))
    }

    /// Number of nodes reachable from the document node, itself included.
    pub fn node_count(&self) -> usize {
        self.xot.descendants(self.root).count()
    }

    fn live(&self, id: NodeId) -> Result<xot::Node> {
        if self.contains(id) {
            Ok(id.node)
        } else {
            Err(Error::NodeNotFound(id))
        }
    }

    fn kind_of(&self, node: xot::Node) -> NodeKind {
        match self.xot.value(node) {
            Value::Document => NodeKind::Document,
            Value::Element(_) => NodeKind::Element,
            Value::Text(_) => NodeKind::Text,
            Value::Comment(_) => NodeKind::Comment,
            Value::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
            Value::Attribute(_) | Value::Namespace(_) => NodeKind::Attribute,
        }
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> Result<NodeId> {
        validate_name(name)?;
        let name = self.xot.add_name(name);
        let node = self.xot.new_element(name);
        Ok(self.handle(node))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        let node = self.xot.new_text(text);
        self.handle(node)
    }

    /// Create a detached comment.
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        let node = self.xot.new_comment(text);
        self.handle(node)
    }

    /// Create a detached processing instruction.
    pub fn create_processing_instruction(&mut self, target: &str, data: &str) -> Result<NodeId> {
        validate_name(target)?;
        let target = self.xot.add_name(target);
        let data = (!data.is_empty()).then_some(data);
        let node = self.xot.new_processing_instruction(target, data);
        Ok(self.handle(node))
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.live(parent)?;
        let child_node = self.live(child)?;
        let parent_kind = self.kind_of(parent_node);
        let child_kind = self.kind_of(child_node);

        if parent_kind.is_text_only() {
            return Err(Error::InvalidOperation(format!(
                "{parent_kind:?} node cannot have children"
            )));
        }
        if self.xot.parent(child_node).is_some() || child_node == self.root {
            return Err(Error::InvalidOperation(format!(
                "node {child:?} is already attached"
            )));
        }
        if self.xot.ancestors(parent_node).any(|a| a == child_node) {
            return Err(Error::InvalidOperation(format!(
                "node {child:?} cannot be appended inside itself"
            )));
        }
        if parent_kind == NodeKind::Document {
            match child_kind {
                NodeKind::Element if self.root_element().is_some() => {
                    return Err(Error::InvalidOperation(
                        "document already has a root element".to_string(),
                    ));
                }
                NodeKind::Text => {
                    return Err(Error::InvalidOperation(
                        "character data is not allowed outside the root element".to_string(),
                    ));
                }
                _ => {}
            }
        }

        self.xot
            .append(parent_node, child_node)
            .map_err(|e| Error::InvalidOperation(e.to_string()))
    }

    /// Detach `id` from its parent. Handles into the subtree become dead.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        let node = self.live(id)?;
        if node == self.root {
            return Err(Error::InvalidOperation(
                "the document node cannot be removed".to_string(),
            ));
        }
        self.detach(node)
    }

    fn detach(&mut self, node: xot::Node) -> Result<()> {
        self.xot
            .detach(node)
            .map_err(|e| Error::InvalidOperation(e.to_string()))?;
        self.removed.insert(node);
        Ok(())
    }

    /// Replace the character content of a node.
    ///
    /// For elements every child is removed and replaced by a single text
    /// node, or by nothing when `text` is empty. Text-only nodes have their
    /// own content replaced.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        let node = self.live(id)?;
        match self.xot.value_mut(node) {
            Value::Document => {
                return Err(Error::InvalidOperation(
                    "the document node has no text of its own".to_string(),
                ));
            }
            Value::Element(_) => {}
            Value::Text(t) => t.set(text),
            Value::Comment(c) => c
                .set(text)
                .map_err(|e| Error::InvalidOperation(e.to_string()))?,
            Value::ProcessingInstruction(pi) => pi.set_data((!text.is_empty()).then_some(text)),
            Value::Attribute(a) => a.set_value(text),
            Value::Namespace(_) => {
                return Err(Error::InvalidOperation(
                    "namespace nodes have no text".to_string(),
                ));
            }
        }
        if self.kind_of(node) != NodeKind::Element {
            return Ok(());
        }

        let children: Vec<_> = self.xot.children(node).collect();
        for child in children {
            self.detach(child)?;
        }
        if !text.is_empty() {
            let text_node = self.xot.new_text(text);
            self.xot
                .append(node, text_node)
                .map_err(|e| Error::InvalidOperation(e.to_string()))?;
        }
        Ok(())
    }

    /// Set an attribute, replacing the value in place if the name exists.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        validate_name(name)?;
        let node = self.live(id)?;
        if !self.xot.is_element(node) {
            return Err(Error::InvalidOperation(format!(
                "cannot set attribute {name:?} on {:?} node",
                self.kind_of(node)
            )));
        }
        let name = self.xot.add_name(name);
        self.xot.set_attribute(node, name, value);
        Ok(())
    }

    /// Live node ids in document order, starting at the document node.
    pub fn document_order(&self) -> Vec<NodeId> {
        self.xot
            .descendants(self.root)
            .map(|n| self.handle(n))
            .collect()
    }
}

/// Validate an element, attribute or PI target name.
fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':');
    let valid_rest = chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'));
    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}

/// Borrowed view of a live node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.doc.kind_of(self.id.node)
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    fn xot(&self) -> &'a Xot {
        &self.doc.xot
    }

    /// Tag name for elements, target for processing instructions, attribute
    /// name for attributes, empty otherwise.
    pub fn name(&self) -> &'a str {
        let xot = self.xot();
        match xot.value(self.id.node) {
            Value::Element(e) => xot.local_name_str(e.name()),
            Value::ProcessingInstruction(pi) => xot.local_name_str(pi.target()),
            Value::Attribute(a) => xot.local_name_str(a.name()),
            _ => "",
        }
    }

    pub fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    pub fn is_text_only(&self) -> bool {
        self.kind().is_text_only()
    }

    /// Own character data of a text-only node.
    pub fn text(&self) -> Option<&'a str> {
        match self.xot().value(self.id.node) {
            Value::Text(t) => Some(t.get()),
            Value::Comment(c) => Some(c.get()),
            Value::ProcessingInstruction(pi) => Some(pi.data().unwrap_or("")),
            Value::Attribute(a) => Some(a.value()),
            _ => None,
        }
    }

    /// Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        if let Some(text) = self.text() {
            return text.to_string();
        }
        let xot = self.xot();
        xot.descendants(self.id.node)
            .filter_map(|n| xot.text_str(n))
            .collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn has_attributes(&self) -> bool {
        self.attributes().next().is_some()
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        let xot = self.xot();
        xot.attributes(self.id.node)
            .iter()
            .map(move |(name, value)| (xot.local_name_str(name), value.as_str()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let parent = self.xot().parent(self.id.node)?;
        self.doc.get(self.doc.handle(parent))
    }

    pub fn child_ids(&self) -> Vec<NodeId> {
        self.xot()
            .children(self.id.node)
            .map(|c| self.doc.handle(c))
            .collect()
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let doc = self.doc;
        self.child_ids().into_iter().filter_map(move |c| doc.get(c))
    }

    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        self.children().filter(|c| c.is_element())
    }

    pub fn has_element_children(&self) -> bool {
        self.element_children().next().is_some()
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        std::iter::successors(self.parent(), |n| n.parent())
    }
}
