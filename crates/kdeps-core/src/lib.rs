//! Dependency collection for kustomization trees
//!
//! This crate computes every filesystem input a `kustomize build` of a
//! directory would read, and renders the result as a make depfile:
//!
//! - **Path classification**: file, directory or remote reference
//! - **Dependency accumulation**: deduplicated file and non-file sets
//! - **Resolution**: recursive walk of resources, generators, patches and charts
//! - **Depfile rendering**: sorted, byte-stable output for build tools
//!
//! # Architecture
//!
//! ```text
//!                 kdeps-cli
//!                     |
//!                 kdeps-core
//!   resolver -> classify, kustomization, accumulator
//!   depfile  -> accumulator
//!                     |
//!                 kdeps-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kdeps_core::{DependencyAccumulator, render_depfile, resolve};
//! use kdeps_fs::{NormalizedPath, OsFileSystem};
//!
//! fn example() -> kdeps_core::Result<Vec<u8>> {
//!     let fs = OsFileSystem::current_dir();
//!     let mut acc = DependencyAccumulator::new();
//!     resolve(&mut acc, &fs, &NormalizedPath::new("overlays/prod"))?;
//!     Ok(render_depfile(&NormalizedPath::new("."), "prod.stamp", &acc))
//! }
//! ```

pub mod accumulator;
pub mod classify;
pub mod depfile;
pub mod error;
pub mod kustomization;
pub mod resolver;

pub use accumulator::DependencyAccumulator;
pub use classify::{ResourceKind, classify};
pub use depfile::{NON_FILE_DEPS_VARIABLE, render_depfile};
pub use error::{Error, Result};
pub use kustomization::{KUSTOMIZATION_FILE_NAMES, Kustomization};
pub use resolver::{DEFAULT_CHART_HOME, Resolver, ResolverOptions, resolve};
