//! In-memory filesystem for tests and fixtures

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, ErrorKind};

use crate::filesystem::{EntryKind, FileSystem};
use crate::{Error, NormalizedPath, Result};

/// A filesystem held entirely in memory.
///
/// Only files are stored; a directory exists whenever some file lives
/// beneath it. Paths registered with [`MemoryFileSystem::deny`] fail every
/// probe with a permission error.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<NormalizedPath, Vec<u8>>,
    denied: BTreeSet<NormalizedPath>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryFileSystem::insert`].
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: &str, content: impl Into<Vec<u8>>) {
        self.files.insert(NormalizedPath::new(path), content.into());
    }

    /// Make every probe of `path` fail with `PermissionDenied`.
    pub fn deny(&mut self, path: &str) {
        self.denied.insert(NormalizedPath::new(path));
    }

    fn check_access(&self, path: &NormalizedPath) -> Result<()> {
        if self.denied.contains(path) {
            return Err(Error::io(
                path.to_native(),
                io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        Ok(())
    }

    fn files_under<'a>(
        &'a self,
        dir: &'a NormalizedPath,
    ) -> impl Iterator<Item = &'a NormalizedPath> + 'a {
        let prefix = if dir.as_str() == "." {
            String::new()
        } else if dir.as_str().ends_with('/') {
            dir.as_str().to_string()
        } else {
            format!("{}/", dir.as_str())
        };
        self.files.keys().filter(move |file| {
            prefix.is_empty() && !file.is_absolute() && !file.as_str().starts_with("..")
                || !prefix.is_empty() && file.as_str().starts_with(&prefix)
        })
    }
}

impl FileSystem for MemoryFileSystem {
    fn entry_kind(&self, path: &NormalizedPath) -> Result<Option<EntryKind>> {
        self.check_access(path)?;
        if self.files.contains_key(path) {
            return Ok(Some(EntryKind::File));
        }
        if self.files_under(path).next().is_some() {
            return Ok(Some(EntryKind::Directory));
        }
        Ok(None)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        self.check_access(path)?;
        match self.files.get(path) {
            Some(content) => Ok(content.clone()),
            None => Err(Error::io(
                path.to_native(),
                io::Error::new(ErrorKind::NotFound, "file does not exist"),
            )),
        }
    }

    fn walk_files(&self, path: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
        match self.entry_kind(path)? {
            Some(EntryKind::File) => Ok(vec![path.clone()]),
            Some(EntryKind::Directory) => Ok(self.files_under(path).cloned().collect()),
            None => Err(Error::io(
                path.to_native(),
                io::Error::new(ErrorKind::NotFound, "directory does not exist"),
            )),
        }
    }
}
