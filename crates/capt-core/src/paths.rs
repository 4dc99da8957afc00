//! Lexical path helpers

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem
///
/// Mirrors what a shell does for `cd a/../b`: `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// True when `candidate` is `root` itself or lies strictly below it
pub fn is_within(root: &Path, candidate: &Path) -> bool {
    candidate.starts_with(root)
}
