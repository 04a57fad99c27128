//! Reading a node back into a [`ValueDescriptor`]

use crate::config::MANAGED_MARKER;
use crate::file::XmlFile;
use xmlfile_content::{NodeId, NodeRef, ValueDescriptor};

/// Describe the observed state of `node`.
///
/// `text` is set when the node has no element children and non-empty text.
/// `attributes` is set, with every attribute except `marker`, when there
/// are any.
pub fn node_to_descriptor(node: NodeRef<'_>, marker: &str) -> ValueDescriptor {
    let mut descriptor = ValueDescriptor::new();

    if !node.has_element_children() {
        let text = node.text_content();
        if !text.is_empty() {
            descriptor.text = Some(text);
        }
    }

    let attributes: Vec<_> = node.attributes().filter(|(name, _)| *name != marker).collect();
    if !attributes.is_empty() {
        descriptor = descriptor.with_attributes(attributes);
    }

    tracing::debug!(node = ?node.id(), ?descriptor, "Converted node");
    descriptor
}

impl XmlFile {
    /// [`node_to_descriptor`] with the default managed marker.
    pub fn node_to_descriptor(node: NodeRef<'_>) -> ValueDescriptor {
        node_to_descriptor(node, MANAGED_MARKER)
    }

    /// Observed state of a node in this file, leaving out the configured
    /// managed marker. `None` for dead handles.
    pub fn describe(&self, id: NodeId) -> Option<ValueDescriptor> {
        self.node(id)
            .map(|node| node_to_descriptor(node, &self.config().managed_marker))
    }
}
