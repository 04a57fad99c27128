//! Queries and desired-state comparison

use crate::error::Result;
use crate::file::XmlFile;
use xmlfile_content::{NodeId, NodeRef, ValueDescriptor, xpath};

impl XmlFile {
    /// Nodes selected by `xpath`, in document order.
    ///
    /// Returns an empty list when nothing matches or no document is loaded.
    pub fn find(&self, xpath: &str) -> Result<Vec<NodeId>> {
        match &self.document {
            Some(document) => Ok(xpath::select(document, document.document_node(), xpath)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn exists(&self, xpath: &str) -> Result<bool> {
        Ok(!self.find(xpath)?.is_empty())
    }

    /// True when `xpath` selects at least one node and every selected node
    /// satisfies `descriptor`.
    pub fn matches(&self, xpath: &str, descriptor: &ValueDescriptor) -> Result<bool> {
        let candidates = self.find(xpath)?;
        if candidates.is_empty() {
            return Ok(false);
        }
        Ok(candidates
            .into_iter()
            .all(|id| self.node_matches(id, descriptor)))
    }

    /// [`node_matches`] for a handle into this file's document, using the
    /// configured managed marker.
    pub fn node_matches(&self, id: NodeId, descriptor: &ValueDescriptor) -> bool {
        node_matches(self.node(id), descriptor, &self.config().managed_marker)
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.document.as_ref().and_then(|document| document.get(id))
    }
}

/// Whether a single node satisfies `descriptor`.
///
/// A missing node never matches. Text is compared only for text-only nodes,
/// and only when the descriptor carries non-empty text. Attributes are
/// compared in both directions: a descriptor with attributes requires the
/// node to carry them with equal values, and a descriptor without them
/// requires a node with none.
///
/// The `marker` attribute is not state. It never counts as an attribute the
/// node carries; a descriptor that names it only asks for it to be present.
pub fn node_matches(node: Option<NodeRef<'_>>, descriptor: &ValueDescriptor, marker: &str) -> bool {
    let Some(node) = node else {
        return false;
    };

    if node.is_text_only()
        && let Some(expected) = descriptor.text_constraint()
        && node.text() != Some(expected)
    {
        return false;
    }

    let has_attributes = node.attributes().any(|(name, _)| name != marker);
    let Some(expected) = &descriptor.attributes else {
        return !has_attributes;
    };

    let (marked, wanted): (Vec<_>, Vec<_>) =
        expected.iter().partition(|(name, _)| name.as_str() == marker);
    let carries = |(name, value): &(&String, &String)| node.attribute(name) == Some(value.as_str());

    if !marked.iter().all(carries) {
        return false;
    }
    if wanted.is_empty() && !marked.is_empty() {
        return true;
    }
    has_attributes && wanted.iter().all(carries)
}
