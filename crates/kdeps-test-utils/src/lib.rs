//! Shared test utilities for the kustomize-deps workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`fixture`]: the checked-in kustomization tree under `test-fixtures/`
//! - [`tree`]: [`TestTree`] builder for ad-hoc kustomization trees on disk

pub mod fixture;
pub mod tree;

pub use tree::TestTree;
