//! Engine settings
//!
//! Settings can be built in code or read from a TOML file:
//!
//! ```toml
//! managed_marker = "Managed"
//! indent = 4
//! atomic_writes = false
//! ```
//!
//! Missing keys fall back to their defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use xmlfile_content::CodecOptions;
use xmlfile_fs::{NormalizedPath, io};

/// Attribute that exempts a child from pruning by `remove_elements`.
pub const MANAGED_MARKER: &str = "Puppet::Util::XmlFile.Managed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlFileConfig {
    /// Attribute name marking children that must survive pruning.
    pub managed_marker: String,
    /// Spaces per nesting level when saving.
    pub indent: usize,
    /// Write through a temp file and rename instead of truncating in place.
    pub atomic_writes: bool,
}

impl Default for XmlFileConfig {
    fn default() -> Self {
        Self {
            managed_marker: MANAGED_MARKER.to_string(),
            indent: 2,
            atomic_writes: true,
        }
    }
}

impl XmlFileConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl Into<NormalizedPath>) -> Result<Self> {
        let path = path.into();
        let Some(source) = io::read_text_if_exists(&path)? else {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        };
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path, ?config, "Loaded xmlfile config");
        Ok(config)
    }

    /// Codec options for files handled with these settings.
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            indent: self.indent,
            ..CodecOptions::default()
        }
    }
}
