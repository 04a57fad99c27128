//! Atomic I/O operations with file locking

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Write content atomically to a file with locking.
///
/// Writes to a temporary sibling file, flushes it to disk and renames it
/// over the target. The parent directory must already exist; a missing
/// directory surfaces as an I/O error.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    let file_name = path.file_name().ok_or_else(|| Error::InvalidPath {
        path: native_path.clone(),
    })?;

    // Same directory as the target so the rename never crosses filesystems
    let temp_name = format!(".{}.{}.tmp", file_name, std::process::id());
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    tracing::debug!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// Overwrite a file in place, without the temp-file indirection.
pub fn write_direct(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    fs::write(&native_path, content).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content if a regular file exists at `path`.
///
/// Returns `Ok(None)` when nothing (or something other than a regular file)
/// is there. Any other failure, such as a permission error, is returned.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    read_text(path).map(Some)
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
