//! Convergence of the document toward a desired state

use crate::error::{Error, Result};
use crate::file::XmlFile;
use regex::Regex;
use std::sync::LazyLock;
use xmlfile_content::xpath::{self, XPath};
use xmlfile_content::{Document, NodeId, ValueDescriptor};

/// A predicate without nested brackets, e.g. `[@id='2' and @kind="a"]`.
static PREDICATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());

/// One `@name = 'literal'` equality term of a predicate.
static EQUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*@([A-Za-z_][\w.\-]*)\s*=\s*(?:'([^']*)'|"([^"]*)")\s*$"#).unwrap()
});

static AND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+and\s+").unwrap());

/// What [`XmlFile::set_tag`] did to one managed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No child matched, so a new one was appended.
    Created,
    /// An existing child matched and its fields were merged in place.
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub node: NodeId,
    pub transition: Transition,
}

/// Per-element results of one [`XmlFile::set_tag`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOutcome {
    pub changes: Vec<Change>,
}

impl SetOutcome {
    fn push(&mut self, node: NodeId, transition: Transition) {
        self.changes.push(Change { node, transition });
    }

    pub fn created(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.with_transition(Transition::Created)
    }

    pub fn updated(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.with_transition(Transition::Updated)
    }

    fn with_transition(&self, transition: Transition) -> impl Iterator<Item = NodeId> + '_ {
        self.changes
            .iter()
            .filter(move |c| c.transition == transition)
            .map(|c| c.node)
    }
}

impl XmlFile {
    /// Create a fresh document whose root-to-leaf chain follows the segments
    /// of `xpath` and ends in `tag`, write it, and reload it as the active
    /// document.
    ///
    /// Returns the leaf element in the reloaded document.
    pub fn create_xml(&mut self, xpath: &str, tag: &str, content: Option<&str>) -> Result<NodeId> {
        let (mut document, leaf) = chain_document(xpath, tag)?;
        if let Some(text) = content {
            document.set_text(leaf, text)?;
        }
        self.persist_new(&document, xpath, tag)
    }

    /// Write a freshly built document and make its reloaded form active.
    fn persist_new(&mut self, document: &Document, xpath: &str, tag: &str) -> Result<NodeId> {
        let rendered = self.codec.render(document)?;
        self.write(&rendered)?;
        self.does_exist = true;
        tracing::info!(path = %self.path, xpath, tag, "Created XML file");

        let reloaded = self.load()?.ok_or_else(|| Error::NoDocument {
            path: self.path.to_native(),
        })?;
        let leaf = deepest_first_element(&reloaded);
        self.document = Some(reloaded);
        Ok(leaf)
    }

    /// Make sure every element selected by `parent_xpath` has a `tag` child
    /// matching `suffix`, carrying the descriptor's text and attributes.
    ///
    /// Matching children are updated in place: text is overwritten and
    /// attributes are merged, leaving unlisted attributes alone. A parent
    /// with no matching child gets a new one appended as its last child,
    /// seeded with the `[@name='literal']` equalities of `suffix` so the
    /// next call finds it. With no document loaded, a new file holding the
    /// whole chain is written instead.
    pub fn set_tag(
        &mut self,
        parent_xpath: &str,
        tag: &str,
        suffix: &str,
        descriptor: &ValueDescriptor,
    ) -> Result<SetOutcome> {
        let mut outcome = SetOutcome::default();

        let seeded = suffix_attributes(suffix);

        if self.document.is_none() {
            let (mut document, leaf) = chain_document(parent_xpath, tag)?;
            seed(&mut document, leaf, &seeded)?;
            apply(&mut document, leaf, descriptor)?;
            let leaf = self.persist_new(&document, parent_xpath, tag)?;
            outcome.push(leaf, Transition::Created);
            return Ok(outcome);
        }

        tracing::debug!(xpath = parent_xpath, tag, suffix, "Setting tag");
        let child_query = XPath::compile(&format!("./{tag}{suffix}"))?;
        let document = self.require_document_mut()?;
        let parents = xpath::select(document, document.document_node(), parent_xpath)?;

        let mut parent_found = false;
        for parent in parents {
            if !document.get(parent).is_some_and(|n| n.is_element()) {
                tracing::warn!(xpath = parent_xpath, node = ?parent, "Skipping non-element parent");
                continue;
            }
            parent_found = true;

            let children = child_query.select(document, parent)?;
            if children.is_empty() {
                let child = document.create_element(tag)?;
                seed(document, child, &seeded)?;
                apply(document, child, descriptor)?;
                document.append_child(parent, child)?;
                tracing::debug!(node = ?child, tag, "Created element");
                outcome.push(child, Transition::Created);
            } else {
                for child in children {
                    apply(document, child, descriptor)?;
                    outcome.push(child, Transition::Updated);
                }
            }
        }

        if !parent_found {
            return Err(Error::NoParent {
                tag: tag.to_string(),
                xpath: parent_xpath.to_string(),
            });
        }
        Ok(outcome)
    }

    /// Remove every node selected by `xpath`, returning how many went.
    pub fn remove_tag(&mut self, xpath: &str) -> Result<usize> {
        let document = self.require_document_mut()?;
        let matched = xpath::select(document, document.document_node(), xpath)?;

        let mut removed = 0;
        for id in matched {
            if id == document.document_node() {
                tracing::warn!(xpath, "Refusing to remove the document node");
                continue;
            }
            // Already gone with a removed ancestor
            if !document.contains(id) {
                continue;
            }
            document.remove(id)?;
            tracing::debug!(xpath, node = ?id, "Removed node");
            removed += 1;
        }
        Ok(removed)
    }

    /// Remove every direct child of the nodes selected by `xpath` that does
    /// not carry the managed marker, text and comments included.
    ///
    /// Returns the selected nodes.
    pub fn remove_elements(&mut self, xpath: &str) -> Result<Vec<NodeId>> {
        let marker = self.config.managed_marker.clone();
        let document = self.require_document_mut()?;
        let matched = xpath::select(document, document.document_node(), xpath)?;

        for &parent in &matched {
            let Some(node) = document.get(parent) else {
                continue;
            };
            let unmanaged: Vec<NodeId> = node
                .children()
                .filter(|child| !child.has_attribute(&marker))
                .map(|child| child.id())
                .collect();
            for child in unmanaged {
                if let Some(node) = document.get(child) {
                    tracing::debug!(node = ?child, kind = ?node.kind(), name = node.name(), "Removing unmanaged node");
                }
                document.remove(child)?;
            }
        }
        Ok(matched)
    }
}

/// A detached document holding the element chain named by the segments of
/// `xpath` followed by `tag`, and the leaf of that chain.
fn chain_document(xpath: &str, tag: &str) -> Result<(Document, NodeId)> {
    let mut document = Document::empty();
    let mut leaf = document.document_node();
    let segments = xpath.split('/').filter(|s| !s.is_empty());
    for name in segments.chain(std::iter::once(tag)) {
        let element = document.create_element(name)?;
        document.append_child(leaf, element)?;
        leaf = element;
    }
    Ok((document, leaf))
}

/// Attribute equalities a new child needs to satisfy `suffix`.
///
/// Only predicates made purely of `@name = 'literal'` terms joined by `and`
/// contribute; anything else (positions, functions, `or`) is not something a
/// fresh element can be seeded with.
fn suffix_attributes(suffix: &str) -> Vec<(String, String)> {
    let mut attributes = Vec::new();
    for predicate in PREDICATE.captures_iter(suffix) {
        let terms: Option<Vec<_>> = AND
            .split(&predicate[1])
            .map(|term| {
                let caps = EQUALITY.captures(term)?;
                let value = caps.get(2).or_else(|| caps.get(3))?;
                Some((caps[1].to_string(), value.as_str().to_string()))
            })
            .collect();
        attributes.extend(terms.into_iter().flatten());
    }
    attributes
}

fn seed(document: &mut Document, id: NodeId, attributes: &[(String, String)]) -> Result<()> {
    for (name, value) in attributes {
        document.set_attribute(id, name, value)?;
    }
    Ok(())
}

fn apply(document: &mut Document, id: NodeId, descriptor: &ValueDescriptor) -> Result<()> {
    if let Some(text) = &descriptor.text {
        document.set_text(id, text)?;
    }
    for (name, value) in descriptor.attributes.iter().flatten() {
        document.set_attribute(id, name, value)?;
    }
    Ok(())
}

fn deepest_first_element(document: &Document) -> NodeId {
    let mut current = document.document_node();
    while let Some(child) = document
        .get(current)
        .and_then(|node| node.element_children().next())
    {
        current = child.id();
    }
    current
}
