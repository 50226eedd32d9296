//! [`TestTree`] builder for kustomization test scenarios.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use kdeps_fs::OsFileSystem;

/// A temporary directory holding a kustomization tree, with helpers for
/// setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use kdeps_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.kustomization("base", "resources:\n  - deployment.yaml\n");
/// tree.file("base/deployment.yaml", "kind: Deployment\n");
/// tree.assert_file_exists("base/kustomization.yaml");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A host filesystem view anchored at the tree root.
    pub fn fs(&self) -> OsFileSystem {
        OsFileSystem::new(self.root())
    }

    /// Write `content` to `path` (relative to the root), creating parents.
    pub fn file(&self, path: &str, content: &str) -> &Self {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestTree::file: failed to create {}: {e}", parent.display()));
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("TestTree::file: failed to write {}: {e}", full_path.display()));
        self
    }

    /// Write `dir/kustomization.yaml`.
    pub fn kustomization(&self, dir: &str, yaml: &str) -> &Self {
        self.file(&format!("{dir}/kustomization.yaml"), yaml)
    }

    /// Create an empty directory.
    pub fn dir(&self, path: &str) -> &Self {
        let full_path = self.root().join(path);
        fs::create_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("TestTree::dir: failed to create {}: {e}", full_path.display()));
        self
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
