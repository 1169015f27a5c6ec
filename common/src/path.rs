//! Lexical helpers for relative install paths.
//!
//! Staged paths are always interpreted relative to an install root that may
//! not exist yet, so these helpers never consult the filesystem.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Lexically normalise a path.
///
/// `.` components are dropped and `name/..` pairs collapse. Leading `..`
/// components of a relative path are kept; `..` directly under the root of
/// an absolute path is dropped. An empty result is returned as `.`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use coordmap_common::path::normalize;
///
/// assert_eq!(normalize(Utf8Path::new("a/./b/../c")), "a/c");
/// assert_eq!(normalize(Utf8Path::new("../a/b/..")), "../a");
/// assert_eq!(normalize(Utf8Path::new("./")), ".");
/// ```
#[must_use]
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut parts: Vec<Utf8Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match parts.last() {
                Some(Utf8Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return Utf8PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Express `target` relative to `base`.
///
/// Both paths are normalised first and are expected to share the same
/// anchoring (both relative to the same root). Components of `base` beyond
/// the common prefix become `..`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use coordmap_common::path::relativize;
///
/// let link = relativize(Utf8Path::new("usr/share/java"), Utf8Path::new("usr/share/java/foo/foo.jar"));
/// assert_eq!(link, "foo/foo.jar");
///
/// let up = relativize(Utf8Path::new("usr/lib/foo"), Utf8Path::new("usr/share/java/foo.jar"));
/// assert_eq!(up, "../../share/java/foo.jar");
/// ```
#[must_use]
pub fn relativize(base: &Utf8Path, target: &Utf8Path) -> Utf8PathBuf {
    let base = normalize(base);
    let target = normalize(target);
    let base_parts: Vec<&str> = meaningful_components(&base).collect();
    let target_parts: Vec<&str> = meaningful_components(&target).collect();

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(left, right)| left == right)
        .count();

    let mut relative = Utf8PathBuf::new();
    for _ in base_parts.iter().skip(common) {
        relative.push("..");
    }
    for part in target_parts.iter().skip(common) {
        relative.push(part);
    }
    if relative.as_str().is_empty() {
        relative.push(".");
    }
    relative
}

/// Return the parent directory of a relative path, treating a bare file name
/// as having no parent.
#[must_use]
pub fn non_empty_parent(path: &Utf8Path) -> Option<&Utf8Path> {
    path.parent().filter(|parent| !parent.as_str().is_empty())
}

/// Return `true` when `path` would climb out of the directory it is joined
/// onto.
#[must_use]
pub fn escapes_root(path: &Utf8Path) -> bool {
    matches!(
        normalize(path).components().next(),
        Some(Utf8Component::ParentDir)
    )
}

fn meaningful_components(path: &Utf8Path) -> impl Iterator<Item = &str> {
    path.components()
        .filter(|component| !matches!(component, Utf8Component::CurDir))
        .map(|component| component.as_str())
}
