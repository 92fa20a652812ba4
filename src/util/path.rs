//! Lexical handling of user-typed locations under the home directory.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` without touching the filesystem. `..` at the root is dropped.
pub fn normalize(path: &Path) -> PathBuf {
    path.components().fold(PathBuf::new(), |mut acc, component| {
        match component {
            Component::ParentDir => {
                acc.pop();
            }
            Component::CurDir => {}
            other => acc.push(other),
        }
        acc
    })
}

/// Place a typed fragment under `home`; a leading separator still counts as relative.
///
/// Returns `None` when the normalized result leaves `home`.
pub fn resolve_under(home: &Path, fragment: &str) -> Option<PathBuf> {
    let relative = fragment.trim().trim_start_matches(['/', '\\']);
    let home = normalize(home);
    let resolved = normalize(&home.join(relative));
    resolved.starts_with(&home).then_some(resolved)
}
