//! Error types for xmlfile-content

use crate::tree::NodeId;

/// Result type for xmlfile-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in xmlfile-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse XML at byte {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Failed to render XML: {message}")]
    Render { message: String },

    #[error("Invalid path expression `{expr}`: {message}")]
    XPath { expr: String, message: String },

    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Invalid tree operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid XML name: {0:?}")]
    InvalidName(String),
}

impl Error {
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    pub fn xpath(expr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::XPath {
            expr: expr.into(),
            message: message.into(),
        }
    }
}
