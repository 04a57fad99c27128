//! Parsing and rendering of XML text
//!
//! The [`XmlCodec`] trait is the seam between the document tree and XML
//! text. [`QuickXmlCodec`] reads and writes through `quick-xml`, which accepts
//! attribute names such as `Puppet::Util::XmlFile.Managed` that a
//! namespace-aware parser rejects.

mod reader;
mod writer;

use crate::error::Result;
use crate::tree::Document;
use serde::{Deserialize, Serialize};

/// Values from the `<?xml ... ?>` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for XmlDeclaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: None,
            standalone: None,
        }
    }
}

/// Knobs for parsing and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecOptions {
    /// Drop namespace prefixes and `xmlns` declarations on load.
    pub strip_namespaces: bool,
    /// Drop text nodes that contain only whitespace on load.
    pub remove_blank_text: bool,
    /// Spaces per nesting level on render; `0` renders on a single line.
    pub indent: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            strip_namespaces: true,
            remove_blank_text: true,
            indent: 2,
        }
    }
}

/// Converts between XML text and [`Document`].
pub trait XmlCodec: Send + Sync {
    /// Parse XML text into a document.
    fn parse(&self, source: &str) -> Result<Document>;

    /// Serialize a full document, declaration included.
    fn render(&self, document: &Document) -> Result<String>;
}

/// `quick-xml` backed codec.
#[derive(Debug, Clone, Default)]
pub struct QuickXmlCodec {
    options: CodecOptions,
}

impl QuickXmlCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }
}

impl XmlCodec for QuickXmlCodec {
    fn parse(&self, source: &str) -> Result<Document> {
        reader::read_document(source, &self.options)
    }

    fn render(&self, document: &Document) -> Result<String> {
        writer::write_document(document, &self.options)
    }
}
