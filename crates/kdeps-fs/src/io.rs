//! Atomic output writes with file locking

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// Acquires an advisory lock on the temp file while writing. The temp file
/// is removed when any step fails.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    // Same directory keeps the rename on one filesystem
    let parent = match native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            parent.to_path_buf()
        }
        None => PathBuf::from("."),
    };

    let prefix = format!(
        ".{}.",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    );
    let mut temp_file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(&parent)
        .map_err(|e| Error::io(&parent, e))?;
    let temp_path = temp_file.path().to_path_buf();

    temp_file.as_file().lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    FileExt::unlock(temp_file.as_file()).map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .persist(&native_path)
        .map_err(|e| Error::io(&native_path, e.error))?;

    Ok(())
}

/// Read a file, treating a missing file as `None`.
pub fn read_optional(path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
    let native_path = path.to_native();
    match fs::read(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(native_path, e)),
    }
}

/// Write `content` only when it differs from what is already on disk.
///
/// Leaves the file (and its mtime) untouched when the bytes match, so a
/// build tool watching it is not retriggered. Returns whether a write happened.
pub fn write_if_changed(path: &NormalizedPath, content: &[u8]) -> Result<bool> {
    if read_optional(path)?.as_deref() == Some(content) {
        tracing::debug!(path = %path, "Output unchanged, skipping write");
        return Ok(false);
    }

    write_atomic(path, content)?;
    tracing::debug!(path = %path, bytes = content.len(), "Wrote output");
    Ok(true)
}
