//! The checked-in kustomization fixture.
//!
//! Layout under `test-fixtures/kustomize/`:
//!
//! - `local-gen` → `local` → `base`, with generators and a patch in `local`
//! - `dev` → `base` plus a remote resource (never reached from `local-gen`)
//! - `helm` with a vendored chart, CRDs, OpenAPI schema and values files

use std::path::PathBuf;

use kdeps_fs::{FileSystem, MemoryFileSystem, NormalizedPath, OsFileSystem};

/// Every file dependency of `local-gen`, sorted as a depfile lists them.
pub const LOCAL_GEN_FILE_DEPS: &[&str] = &[
    "base/config.ini",
    "base/deployment.yaml",
    "base/ingress.yaml",
    "base/kustomization.yaml",
    "base/service.yaml",
    "local-gen/kustomization.yaml",
    "local/config.env",
    "local/deployment.yaml",
    "local/kustomization.yaml",
    "local/secret.env",
    "local/tls.crt",
    "local/tls.key",
];

/// The remote resource declared by `dev`.
pub const DEV_REMOTE_RESOURCE: &str = "github.com/example/platform//monitoring?ref=v1.2.0";

/// Path to the fixture tree.
pub fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/kdeps-test-utils -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures/kustomize")
}

/// The fixture tree as a host filesystem anchored at its root.
pub fn os_fixture() -> OsFileSystem {
    OsFileSystem::new(fixtures_dir())
}

/// The fixture tree copied into memory, with the same relative paths.
///
/// # Panics
/// Panics if the fixture directory cannot be read.
pub fn memory_fixture() -> MemoryFileSystem {
    let source = os_fixture();
    let mut fs = MemoryFileSystem::new();
    let files = source
        .walk_files(&NormalizedPath::new("."))
        .unwrap_or_else(|e| panic!("memory_fixture: failed to walk fixtures: {e}"));
    for file in files {
        let content = source
            .read(&file)
            .unwrap_or_else(|e| panic!("memory_fixture: failed to read {file}: {e}"));
        fs.insert(file.as_str(), content);
    }
    fs
}
