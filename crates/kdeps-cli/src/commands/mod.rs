//! Command implementations for the kustomize-deps binary

mod generate;

pub use generate::{GenerateArgs, run_generate};
