//! Read-only filesystem view consumed by the resolver

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// What a path points at when it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Read-only access to a tree of files.
///
/// Implementations never write. A path that does not exist is reported as
/// `Ok(None)` by [`FileSystem::entry_kind`]; every other probe failure is an
/// error.
pub trait FileSystem {
    /// Probe the path's metadata.
    fn entry_kind(&self, path: &NormalizedPath) -> Result<Option<EntryKind>>;

    /// Read the full content of a file.
    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>>;

    /// List every non-directory entry beneath `path`, recursively.
    ///
    /// Returned paths keep `path` as their prefix. Walking a file yields the
    /// file itself; walking a missing path is an error.
    fn walk_files(&self, path: &NormalizedPath) -> Result<Vec<NormalizedPath>>;
}

/// The host filesystem, with relative paths anchored at a root directory.
#[derive(Debug, Clone)]
pub struct OsFileSystem {
    root: PathBuf,
}

impl OsFileSystem {
    /// Anchor relative paths at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Anchor relative paths at the process working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// The directory relative paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn native(&self, path: &NormalizedPath) -> PathBuf {
        if path.is_absolute() {
            path.to_native()
        } else {
            self.root.join(path.to_native())
        }
    }
}

impl Default for OsFileSystem {
    fn default() -> Self {
        Self::current_dir()
    }
}

impl FileSystem for OsFileSystem {
    fn entry_kind(&self, path: &NormalizedPath) -> Result<Option<EntryKind>> {
        let native = self.native(path);
        match fs::metadata(&native) {
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(Some(EntryKind::File)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(native, e)),
        }
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        let native = self.native(path);
        fs::read(&native).map_err(|e| Error::io(native, e))
    }

    fn walk_files(&self, path: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
        let native = self.native(path);
        let mut files = Vec::new();

        for entry in WalkDir::new(&native).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(&native, e))?;
            if entry.file_type().is_dir() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&native)
                .map_err(|e| Error::Walk {
                    path: entry.path().to_path_buf(),
                    message: e.to_string(),
                })?;
            if relative.as_os_str().is_empty() {
                files.push(path.clone());
            } else {
                files.push(path.join(&relative.to_string_lossy()));
            }
        }

        tracing::trace!(path = %path, count = files.len(), "Walked directory");
        Ok(files)
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.into_io_error() {
        Some(source) => Error::io(path, source),
        None => Error::Walk {
            path,
            message: "filesystem loop detected".to_string(),
        },
    }
}
