//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A lexically cleaned path using forward slashes internally.
///
/// Paths are cleaned on construction: repeated separators collapse, `.`
/// components disappear and `..` consumes the preceding component where one
/// exists. Leading `..` components of a relative path are kept, so a
/// reference such as `../base` stays meaningful.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes and cleans the result.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment and clean the result.
    ///
    /// The segment is always treated as relative to `self`, even when it
    /// starts with a separator.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if segment_normalized.is_empty() {
            return self.clone();
        }
        let joined = format!("{}/{}", self.inner, segment_normalized);
        Self {
            inner: clean(&joined),
        }
    }

    /// Whether the path starts at the filesystem root.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Anchor a relative path at `dir`; absolute paths are returned as-is.
    pub fn absolute_from(&self, dir: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            dir.join(&self.inner)
        }
    }

    /// Express this path relative to `base`.
    ///
    /// Purely lexical. Returns `None` when no relative form exists: one path
    /// is absolute and the other is not, or `base` climbs out through `..`
    /// components that `self` does not share.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<NormalizedPath> {
        if self.is_absolute() != base.is_absolute() {
            return None;
        }
        if self == base {
            return Some(Self {
                inner: ".".to_string(),
            });
        }

        let target: Vec<&str> = components(&self.inner).collect();
        let base: Vec<&str> = components(&base.inner).collect();

        let common = target
            .iter()
            .zip(base.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = Vec::with_capacity(base.len() - common + target.len() - common);
        for component in &base[common..] {
            if *component == ".." {
                return None;
            }
            parts.push("..");
        }
        parts.extend(&target[common..]);

        if parts.is_empty() {
            return Some(Self {
                inner: ".".to_string(),
            });
        }
        Some(Self {
            inner: parts.join("/"),
        })
    }
}

/// Iterate the meaningful components of an already-cleaned path.
fn components(cleaned: &str) -> impl Iterator<Item = &str> {
    cleaned.split('/').filter(|c| !c.is_empty() && *c != ".")
}

/// Lexically clean a forward-slash path.
fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => match out.last() {
                Some(last) if *last != ".." => {
                    out.pop();
                }
                // `/..` is `/`
                _ if rooted => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }

    let joined = out.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
