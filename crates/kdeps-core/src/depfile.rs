//! Make-compatible depfile rendering
//!
//! ```text
//! <target>: <file> <file> ...
//! <target>: X_KUSTOMIZE_NON_FILE_DEPS='<id> <id> ...'
//! ```
//!
//! The second line is only written when non-file dependencies exist. Both
//! lists are sorted so the output is stable across runs.

use kdeps_fs::NormalizedPath;

use crate::accumulator::DependencyAccumulator;

/// Make variable that carries non-file dependencies.
pub const NON_FILE_DEPS_VARIABLE: &str = "X_KUSTOMIZE_NON_FILE_DEPS";

/// Render `acc` as depfile bytes for `target`.
///
/// File paths are written relative to `base` when a relative form exists and
/// verbatim otherwise.
pub fn render_depfile(base: &NormalizedPath, target: &str, acc: &DependencyAccumulator) -> Vec<u8> {
    let mut deps: Vec<String> = acc
        .file_deps()
        .map(|dep| match dep.relative_to(base) {
            Some(relative) => relative.to_string(),
            None => dep.to_string(),
        })
        .collect();
    deps.sort();

    let mut text = String::from(target);
    text.push(':');
    for dep in &deps {
        text.push(' ');
        text.push_str(dep);
    }
    text.push('\n');

    if acc.non_file_count() > 0 {
        let non_file: Vec<&str> = acc.non_file_deps().collect();
        text.push_str(target);
        text.push_str(": ");
        text.push_str(NON_FILE_DEPS_VARIABLE);
        text.push_str("='");
        text.push_str(&non_file.join(" "));
        text.push_str("'\n");
    }

    text.into_bytes()
}
