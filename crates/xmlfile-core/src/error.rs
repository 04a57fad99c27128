//! Error types for xmlfile-core

use std::path::PathBuf;

/// Result type for xmlfile-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in xmlfile-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An upsert whose parent expression matched no element
    #[error("Unable to set <{tag}>. No parents found for the xpath {xpath}")]
    NoParent { tag: String, xpath: String },

    /// A mutation or save was requested before any document was loaded
    #[error("No document loaded for {path}")]
    NoDocument { path: PathBuf },

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from xmlfile-fs
    #[error(transparent)]
    Fs(#[from] xmlfile_fs::Error),

    /// Parse, render, tree or query error from xmlfile-content
    #[error(transparent)]
    Content(#[from] xmlfile_content::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
