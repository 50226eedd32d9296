//! Classification of referenced paths

use kdeps_fs::{EntryKind, FileSystem, NormalizedPath};

use crate::error::Result;

/// What a reference inside a kustomization points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// An existing file.
    File,
    /// An existing directory, expected to hold another kustomization.
    Directory,
    /// Nothing on the local filesystem; treated as a remote reference.
    Remote,
}

/// Classify `path` by probing its metadata.
///
/// A path that does not exist is `Remote`. Any other probe failure is
/// returned as an error rather than guessed at.
pub fn classify(fs: &dyn FileSystem, path: &NormalizedPath) -> Result<ResourceKind> {
    let kind = match fs.entry_kind(path)? {
        Some(EntryKind::Directory) => ResourceKind::Directory,
        Some(EntryKind::File) => ResourceKind::File,
        None => ResourceKind::Remote,
    };
    Ok(kind)
}
