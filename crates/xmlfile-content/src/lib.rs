//! XML document tree, codec, and path queries for xmlfile
//!
//! Provides an owned XML tree on top of a `xot` arena, a `quick-xml` backed
//! codec that strips namespaces and blank text on load, `xee-xpath` queries
//! against the tree, and the value descriptor used to express desired and
//! observed node state.

pub mod codec;
pub mod descriptor;
pub mod error;
pub mod tree;
pub mod xpath;

pub use codec::{CodecOptions, QuickXmlCodec, XmlCodec, XmlDeclaration};
pub use descriptor::ValueDescriptor;
pub use error::{Error, Result};
pub use tree::{Document, NodeId, NodeKind, NodeRef};
