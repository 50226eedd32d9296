//! Filesystem abstraction for kustomize-deps
//!
//! Provides lexically normalized paths, a read-only filesystem trait with
//! host and in-memory implementations, and safe output writes.

pub mod error;
pub mod filesystem;
pub mod io;
pub mod memory;
pub mod path;

pub use error::{Error, Result};
pub use filesystem::{EntryKind, FileSystem, OsFileSystem};
pub use memory::MemoryFileSystem;
pub use path::NormalizedPath;
