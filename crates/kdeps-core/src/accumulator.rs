//! Deduplicating dependency collector

use std::collections::BTreeSet;

use kdeps_fs::NormalizedPath;

/// File and non-file dependencies gathered during one resolution run.
///
/// Both partitions are sets, so recording the same entry twice is a no-op.
/// There is no removal; the accumulator only grows while the resolver walks
/// the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyAccumulator {
    file_deps: BTreeSet<NormalizedPath>,
    non_file_deps: BTreeSet<String>,
}

impl DependencyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a local file. Returns `true` if it was not already present.
    pub fn record_file(&mut self, path: impl Into<NormalizedPath>) -> bool {
        let path = path.into();
        tracing::trace!(dep = %path, "Recording file dependency");
        self.file_deps.insert(path)
    }

    /// Record a non-file reference, such as a remote URL.
    /// Returns `true` if it was not already present.
    pub fn record_remote(&mut self, identifier: impl Into<String>) -> bool {
        let identifier = identifier.into();
        tracing::trace!(dep = %identifier, "Recording non-file dependency");
        self.non_file_deps.insert(identifier)
    }

    pub fn contains_file(&self, path: impl Into<NormalizedPath>) -> bool {
        self.file_deps.contains(&path.into())
    }

    pub fn contains_remote(&self, identifier: &str) -> bool {
        self.non_file_deps.contains(identifier)
    }

    /// File dependencies in path order.
    pub fn file_deps(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.file_deps.iter()
    }

    /// Non-file dependencies in lexicographic order.
    pub fn non_file_deps(&self) -> impl Iterator<Item = &str> {
        self.non_file_deps.iter().map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.file_deps.len()
    }

    pub fn non_file_count(&self) -> usize {
        self.non_file_deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_deps.is_empty() && self.non_file_deps.is_empty()
    }
}
