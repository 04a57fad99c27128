//! The document store: one XML file and its in-memory tree

use crate::config::XmlFileConfig;
use crate::error::{Error, Result};
use xmlfile_content::{Document, QuickXmlCodec, XmlCodec};
use xmlfile_fs::{NormalizedPath, io};

/// An XML configuration file opened for querying and convergence.
///
/// The file is read once when opened. Mutations apply to the in-memory
/// document and reach disk only through [`XmlFile::save`], except for
/// [`XmlFile::create_xml`], which writes immediately.
pub struct XmlFile {
    pub(crate) path: NormalizedPath,
    pub(crate) document: Option<Document>,
    pub(crate) codec: Box<dyn XmlCodec>,
    pub(crate) config: XmlFileConfig,
    pub(crate) does_exist: bool,
}

impl XmlFile {
    /// Open `path` with default settings.
    ///
    /// A missing file is not an error: the store starts with no document and
    /// the first [`XmlFile::set_tag`] synthesizes one.
    pub fn open(path: impl Into<NormalizedPath>) -> Result<Self> {
        Self::open_with_config(path, XmlFileConfig::default())
    }

    pub fn open_with_config(path: impl Into<NormalizedPath>, config: XmlFileConfig) -> Result<Self> {
        let codec = QuickXmlCodec::new(config.codec_options());
        Self::open_with_codec(path, config, codec)
    }

    /// Open `path` using a custom codec for parsing and rendering.
    pub fn open_with_codec(
        path: impl Into<NormalizedPath>,
        config: XmlFileConfig,
        codec: impl XmlCodec + 'static,
    ) -> Result<Self> {
        let mut file = Self {
            path: path.into(),
            document: None,
            codec: Box::new(codec),
            config,
            does_exist: false,
        };
        file.document = file.load()?;
        file.does_exist = file.document.is_some();
        Ok(file)
    }

    /// Parse the file at this store's path, or `None` if there is no file.
    pub(crate) fn load(&self) -> Result<Option<Document>> {
        let Some(source) = io::read_text_if_exists(&self.path)? else {
            tracing::debug!(path = %self.path, "No XML file present");
            return Ok(None);
        };
        let document = self.codec.parse(&source)?;
        tracing::debug!(path = %self.path, nodes = document.node_count(), "Loaded XML file");
        Ok(Some(document))
    }

    /// Write `content` to this store's path using the configured strategy.
    pub(crate) fn write(&self, content: &str) -> Result<()> {
        if self.config.atomic_writes {
            io::write_text(&self.path, content)?;
        } else {
            io::write_direct(&self.path, content.as_bytes())?;
        }
        Ok(())
    }

    /// Serialize the current document and overwrite the file.
    pub fn save(&mut self) -> Result<()> {
        let rendered = self.render()?;
        self.write(&rendered)?;
        self.does_exist = true;
        tracing::info!(path = %self.path, "Saved XML file");
        Ok(())
    }

    /// Serialize the current document without writing it.
    pub fn render(&self) -> Result<String> {
        Ok(self.codec.render(self.require_document()?)?)
    }

    /// Whether the file existed when opened or has been written since.
    pub fn file_exists(&self) -> bool {
        self.does_exist
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn config(&self) -> &XmlFileConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    pub(crate) fn require_document(&self) -> Result<&Document> {
        self.document.as_ref().ok_or_else(|| self.no_document())
    }

    pub(crate) fn require_document_mut(&mut self) -> Result<&mut Document> {
        match self.document {
            Some(ref mut document) => Ok(document),
            None => Err(Error::NoDocument {
                path: self.path.to_native(),
            }),
        }
    }

    fn no_document(&self) -> Error {
        Error::NoDocument {
            path: self.path.to_native(),
        }
    }
}

impl std::fmt::Debug for XmlFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlFile")
            .field("path", &self.path)
            .field("loaded", &self.document.is_some())
            .field("does_exist", &self.does_exist)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
