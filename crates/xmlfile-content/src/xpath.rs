//! Path expressions over a [`Document`]
//!
//! Expressions are compiled and evaluated by `xee-xpath`, so the full XPath
//! language is available in predicates: arithmetic, negative positions,
//! `string-length()` and the rest of the function library.
//!
//! # Examples
//!
//! ```
//! use xmlfile_content::{Document, xpath};
//!
//! let doc = Document::parse("<config><item id=\"1\">x</item></config>").unwrap();
//! let found = xpath::select(&doc, doc.document_node(), "//config/item[@id='1']").unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(doc.get(found[0]).unwrap().text_content(), "x");
//! ```
//!
//! Namespaces are stripped before queries run, so names are matched without
//! prefixes. A query result is always a list of nodes; attribute steps such
//! as `//item/@id` select attribute nodes.

use crate::error::{Error, Result};
use crate::tree::{Document, NodeId};
use xee_xpath::{Documents, Item, Queries, Query, query::SequenceQuery};

/// A compiled path expression.
#[derive(Debug, Clone)]
pub struct XPath {
    source: String,
    query: SequenceQuery,
}

impl XPath {
    /// Parse an expression once for repeated evaluation.
    pub fn compile(expr: &str) -> Result<Self> {
        let query = Queries::default()
            .sequence(expr)
            .map_err(|e| Error::xpath(expr, e.to_string()))?;
        Ok(Self {
            source: expr.to_string(),
            query,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluate relative to `context`, returning matched nodes in document order.
    pub fn select(&self, doc: &Document, context: NodeId) -> Result<Vec<NodeId>> {
        if !doc.contains(context) {
            return Err(Error::NodeNotFound(context));
        }

        // Evaluation runs on a snapshot so document order is computed
        // against the tree as it is now, not as it was at an earlier query.
        let mut documents = Documents::new();
        *documents.xot_mut() = doc.xot().clone();

        let sequence = self
            .query
            .execute(&mut documents, context.node())
            .map_err(|e| Error::xpath(&self.source, e.to_string()))?;

        sequence
            .iter()
            .map(|item| match item {
                Item::Node(node) => Ok(doc.handle(node)),
                _ => Err(Error::xpath(
                    &self.source,
                    "expression does not select nodes",
                )),
            })
            .collect()
    }
}

/// Compile and evaluate `expr` relative to `context`.
pub fn select(doc: &Document, context: NodeId, expr: &str) -> Result<Vec<NodeId>> {
    XPath::compile(expr)?.select(doc, context)
}

/// Build `xpath/tag[@uri="uri"]`, using `*` when no tag is given.
pub fn child_path(xpath: &str, tag: Option<&str>, uri: Option<&str>) -> String {
    let separator = if xpath.ends_with('/') { "" } else { "/" };
    let tag = tag.unwrap_or("*");
    match uri {
        Some(uri) => format!("{xpath}{separator}{tag}[@uri=\"{uri}\"]"),
        None => format!("{xpath}{separator}{tag}"),
    }
}
