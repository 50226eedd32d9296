//! End-to-end tests that invoke the compiled `kustomize-deps` binary.
//!
//! The binary resolves relative to its working directory, so every run
//! happens inside the fixture tree (or a temporary tree) and writes its
//! depfile into a separate temporary directory.

use std::fs;
use std::path::Path;
use std::time::Duration;

use assert_cmd::Command;
use assert_fs::prelude::*;
use kdeps_test_utils::TestTree;
use kdeps_test_utils::fixture::{DEV_REMOTE_RESOURCE, LOCAL_GEN_FILE_DEPS, fixtures_dir};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

/// Get a Command for the kustomize-deps binary running in `dir`
fn kdeps_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kustomize-deps"));
    cmd.current_dir(dir);
    cmd
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn test_help_output() {
    kdeps_cmd(&fixtures_dir())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--target"));
}

#[test]
fn test_missing_required_flag_fails() {
    let out = assert_fs::TempDir::new().unwrap();

    kdeps_cmd(&fixtures_dir())
        .args(["-i", "local-gen", "-o"])
        .arg(out.child("local-gen.d").path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("--target"));

    out.child("local-gen.d").assert(predicate::path::missing());
}

#[test]
fn test_usage_error_is_a_single_line() {
    let output = kdeps_cmd(&fixtures_dir())
        .args(["-i", "local-gen", "-t", "local-gen.stamp"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1, "got: {stderr}");
    assert!(!stderr.contains("Usage:"), "got: {stderr}");
    assert!(stderr.contains("--output"), "got: {stderr}");
}

// ============================================================================
// Depfile output
// ============================================================================

#[test]
fn test_local_gen_depfile() {
    let out = assert_fs::TempDir::new().unwrap();
    let depfile = out.child("local-gen.d");

    kdeps_cmd(&fixtures_dir())
        .args(["-i", "local-gen", "-t", "local-gen.stamp", "-o"])
        .arg(depfile.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let expected = format!("local-gen.stamp: {}\n", LOCAL_GEN_FILE_DEPS.join(" "));
    assert_eq!(fs::read_to_string(depfile.path()).unwrap(), expected);
}

#[test]
fn test_dev_depfile_lists_remote_resource() {
    let out = assert_fs::TempDir::new().unwrap();
    let depfile = out.child("dev.d");

    kdeps_cmd(&fixtures_dir())
        .args(["--input", "dev", "--target", "dev.stamp", "--output"])
        .arg(depfile.path())
        .assert()
        .success();

    let content = fs::read_to_string(depfile.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("dev.stamp: base/config.ini "));
    assert!(lines[0].contains(" dev/kustomization.yaml"));
    assert_eq!(
        lines[1],
        format!("dev.stamp: X_KUSTOMIZE_NON_FILE_DEPS='{DEV_REMOTE_RESOURCE}'")
    );
}

#[test]
fn test_base_changes_rendered_paths() {
    let out = assert_fs::TempDir::new().unwrap();
    let depfile = out.child("local.d");

    kdeps_cmd(&fixtures_dir())
        .args(["-i", "local", "-t", "local.stamp", "-b", "local", "-o"])
        .arg(depfile.path())
        .assert()
        .success();

    let content = fs::read_to_string(depfile.path()).unwrap();
    assert!(content.starts_with("local.stamp: ../base/config.ini "), "got: {content}");
    assert!(content.contains(" kustomization.yaml "), "got: {content}");
}

#[test]
fn test_absolute_base_with_relative_input() {
    let out = assert_fs::TempDir::new().unwrap();
    let depfile = out.child("local.d");
    let base = fs::canonicalize(fixtures_dir().join("local")).unwrap();

    kdeps_cmd(&fixtures_dir())
        .args(["-i", "local", "-t", "local.stamp", "-o"])
        .arg(depfile.path())
        .arg("-b")
        .arg(&base)
        .assert()
        .success();

    let content = fs::read_to_string(depfile.path()).unwrap();
    assert!(content.starts_with("local.stamp: ../base/config.ini "), "got: {content}");
    assert!(content.contains(" kustomization.yaml "), "got: {content}");
    assert!(!content.contains("local/kustomization.yaml"), "got: {content}");
}

#[test]
fn test_unchanged_output_is_not_rewritten() {
    let out = assert_fs::TempDir::new().unwrap();
    let depfile = out.child("local-gen.d");
    let run = || {
        kdeps_cmd(&fixtures_dir())
            .args(["-i", "local-gen", "-t", "local-gen.stamp", "-o"])
            .arg(depfile.path())
            .assert()
            .success();
    };

    run();
    let first = fs::metadata(depfile.path()).unwrap().modified().unwrap();
    std::thread::sleep(Duration::from_millis(50));
    run();
    let second = fs::metadata(depfile.path()).unwrap().modified().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_stale_output_is_replaced() {
    let out = assert_fs::TempDir::new().unwrap();
    let depfile = out.child("local-gen.d");
    depfile.write_str("local-gen.stamp: stale.yaml\n").unwrap();

    kdeps_cmd(&fixtures_dir())
        .args(["-i", "local-gen", "-t", "local-gen.stamp", "-o"])
        .arg(depfile.path())
        .assert()
        .success();

    let content = fs::read_to_string(depfile.path()).unwrap();
    assert!(content.contains("local/kustomization.yaml"));
    assert!(!content.contains("stale.yaml"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_kustomization_reports_error() {
    let tree = TestTree::new();
    tree.dir("empty");
    let out = assert_fs::TempDir::new().unwrap();

    kdeps_cmd(tree.root())
        .args(["-i", "empty", "-t", "empty.stamp", "-o"])
        .arg(out.child("empty.d").path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains(
            "unable to find one of 'kustomization.yaml', 'kustomization.yml', or 'Kustomization' in directory 'empty'",
        ));

    out.child("empty.d").assert(predicate::path::missing());
}

#[test]
fn test_ambiguous_kustomization_reports_error() {
    let tree = TestTree::new();
    tree.file("app/kustomization.yaml", "resources: []\n");
    tree.file("app/kustomization.yml", "resources: []\n");
    let out = assert_fs::TempDir::new().unwrap();

    kdeps_cmd(tree.root())
        .args(["-i", "app", "-t", "app.stamp", "-o"])
        .arg(out.child("app.d").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("found multiple kustomization files under: app"));
}

#[test]
fn test_cycle_reports_error() {
    let tree = TestTree::new();
    tree.kustomization("a", "resources:\n  - ../b\n");
    tree.kustomization("b", "resources:\n  - ../a\n");
    let out = assert_fs::TempDir::new().unwrap();

    kdeps_cmd(tree.root())
        .args(["-i", "a", "-t", "a.stamp", "-o"])
        .arg(out.child("a.d").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("a -> b -> a"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let tree = TestTree::new();
    tree.kustomization("app", "resources:\n  - svc.yaml\n");
    tree.file("app/svc.yaml", "kind: Service\n");

    kdeps_cmd(tree.root())
        .args(["-v", "-i", "app", "-t", "app.stamp", "-o", "app.d"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolving kustomization"));

    tree.assert_file_exists("app.d");
    assert_eq!(tree.read("app.d"), "app.stamp: app/kustomization.yaml app/svc.yaml\n");
}
