//! Error types for kdeps-core

use kdeps_fs::NormalizedPath;

/// Result type for kdeps-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a kustomization tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No recognized kustomization file in a directory
    #[error(
        "unable to find one of {} in directory '{dir}'",
        format_candidates(.candidates)
    )]
    MissingKustomization {
        dir: NormalizedPath,
        candidates: Vec<String>,
    },

    /// More than one recognized kustomization file in the same directory
    #[error("found multiple kustomization files under: {dir}")]
    AmbiguousKustomization {
        dir: NormalizedPath,
        files: Vec<NormalizedPath>,
    },

    /// Document does not match the kustomization schema
    #[error("failed to parse kustomization at {path}: {message}")]
    Parse {
        path: NormalizedPath,
        message: String,
    },

    /// A directory references itself through its own resources
    #[error("kustomization cycle detected: {}", format_chain(.chain))]
    KustomizationCycle {
        dir: NormalizedPath,
        chain: Vec<NormalizedPath>,
    },

    /// Filesystem error from kdeps-fs
    #[error(transparent)]
    Fs(#[from] kdeps_fs::Error),
}

impl Error {
    pub fn parse(path: &NormalizedPath, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.clone(),
            message: message.into(),
        }
    }
}

/// Quote and join candidate names: `'a', 'b', or 'c'`.
fn format_candidates(candidates: &[String]) -> String {
    let mut text = String::new();
    for (i, name) in candidates.iter().enumerate() {
        if i > 0 {
            if i == candidates.len() - 1 {
                text.push_str(", or ");
            } else {
                text.push_str(", ");
            }
        }
        text.push('\'');
        text.push_str(name);
        text.push('\'');
    }
    text
}

fn format_chain(chain: &[NormalizedPath]) -> String {
    chain
        .iter()
        .map(NormalizedPath::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
