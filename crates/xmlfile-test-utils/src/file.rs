//! [`TestXmlFile`] builder for XML files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An XML file path inside its own temporary directory.
///
/// The file is only written when content is supplied, so the same builder
/// covers both "existing file" and "no file yet" scenarios.
///
/// # Example
///
/// ```rust
/// use xmlfile_test_utils::file::TestXmlFile;
///
/// let file = TestXmlFile::new().with_content("<config/>");
/// assert!(file.path().exists());
/// file.assert_contains("<config/>");
/// ```
pub struct TestXmlFile {
    temp_dir: TempDir,
    name: String,
}

impl Default for TestXmlFile {
    fn default() -> Self {
        Self::new()
    }
}

impl TestXmlFile {
    /// A `config.xml` path in a fresh temporary directory, not yet written.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            name: "config.xml".to_string(),
        }
    }

    /// Use a different file name, which may include subdirectories.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Write `content` to the file, creating parent directories.
    pub fn with_content(self, content: &str) -> Self {
        let path = self.path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Root of the temporary directory.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self) -> PathBuf {
        self.dir().join(&self.name)
    }

    /// Current file content.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self) -> String {
        let path = self.path();
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that the file exists.
    pub fn assert_exists(&self) {
        let path = self.path();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that the file does **not** exist.
    pub fn assert_not_exists(&self) {
        let path = self.path();
        assert!(
            !path.exists(),
            "Expected file NOT to exist: {}",
            path.display()
        );
    }

    /// Assert that the file contains `content`.
    pub fn assert_contains(&self, content: &str) {
        let file_content = self.read();
        assert!(
            file_content.contains(content),
            "File {} does not contain {:?}. Content:\n{}",
            self.path().display(),
            content,
            file_content
        );
    }
}
