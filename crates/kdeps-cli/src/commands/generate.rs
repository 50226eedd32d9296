//! Depfile generation
//!
//! Resolves one kustomization tree, renders the depfile and writes it only
//! when its content changed, so make does not see a fresh mtime on every run.

use std::path::PathBuf;

use kdeps_core::{DependencyAccumulator, render_depfile, resolve};
use kdeps_fs::{FileSystem, NormalizedPath, io};

use crate::error::{CliError, Result};

/// Inputs for [`run_generate`].
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub target: String,
    pub base: PathBuf,
}

/// Resolve `args.input` on `fs` and write the depfile to `args.output`.
///
/// Returns whether the output file was (re)written.
pub fn run_generate(fs: &dyn FileSystem, args: &GenerateArgs) -> Result<bool> {
    if args.target.trim().is_empty() {
        return Err(CliError::user("target must not be empty"));
    }

    let (root, base) = anchor(NormalizedPath::new(&args.input), NormalizedPath::new(&args.base))?;
    let mut acc = DependencyAccumulator::new();
    resolve(&mut acc, fs, &root)?;
    tracing::debug!(
        input = %root,
        files = acc.file_count(),
        non_files = acc.non_file_count(),
        "Resolved kustomization"
    );

    let depfile = render_depfile(&base, &args.target, &acc);
    let written = io::write_if_changed(&NormalizedPath::new(&args.output), &depfile)?;
    Ok(written)
}

/// Make the input root and the base comparable.
///
/// Dependencies inherit the root's form, and a relative form only exists
/// between two relative or two absolute paths. When exactly one of them is
/// absolute, both are anchored at the working directory.
fn anchor(root: NormalizedPath, base: NormalizedPath) -> Result<(NormalizedPath, NormalizedPath)> {
    if root.is_absolute() == base.is_absolute() {
        return Ok((root, base));
    }
    let cwd = NormalizedPath::new(std::env::current_dir()?);
    Ok((root.absolute_from(&cwd), base.absolute_from(&cwd)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdeps_fs::MemoryFileSystem;
    use tempfile::tempdir;

    fn args(output: PathBuf) -> GenerateArgs {
        GenerateArgs {
            input: PathBuf::from("app"),
            output,
            target: "app.stamp".to_string(),
            base: PathBuf::from("."),
        }
    }

    fn app_fs() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("app/kustomization.yaml", "resources:\n  - svc.yaml\n")
            .with_file("app/svc.yaml", "kind: Service\n")
    }

    #[test]
    fn writes_depfile() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("app.d");

        assert!(run_generate(&app_fs(), &args(output.clone())).unwrap());
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "app.stamp: app/kustomization.yaml app/svc.yaml\n"
        );
    }

    #[test]
    fn unchanged_output_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("app.d");

        assert!(run_generate(&app_fs(), &args(output.clone())).unwrap());
        assert!(!run_generate(&app_fs(), &args(output)).unwrap());
    }

    #[test]
    fn resolution_error_leaves_output_alone() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("app.d");
        std::fs::write(&output, "previous\n").unwrap();

        let err = run_generate(&MemoryFileSystem::new(), &args(output.clone())).unwrap_err();

        assert!(matches!(err, CliError::Core(_)), "unexpected error: {err}");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[test]
    fn matching_forms_are_left_alone() {
        let (root, base) = anchor(NormalizedPath::new("app"), NormalizedPath::new(".")).unwrap();
        assert_eq!(root.as_str(), "app");
        assert_eq!(base.as_str(), ".");
    }

    #[test]
    fn absolute_base_anchors_relative_root() {
        let cwd = NormalizedPath::new(std::env::current_dir().unwrap());
        let base = cwd.join("app");

        let (root, anchored_base) = anchor(NormalizedPath::new("app"), base.clone()).unwrap();

        assert_eq!(root, cwd.join("app"));
        assert_eq!(anchored_base, base);
        assert_eq!(
            cwd.join("base/cm.yaml").relative_to(&anchored_base).unwrap().as_str(),
            "../base/cm.yaml"
        );
    }

    #[test]
    fn empty_target_is_rejected() {
        let dir = tempdir().unwrap();
        let mut args = args(dir.path().join("app.d"));
        args.target = "  ".to_string();

        let err = run_generate(&app_fs(), &args).unwrap_err();
        assert_eq!(err.to_string(), "target must not be empty");
    }
}
