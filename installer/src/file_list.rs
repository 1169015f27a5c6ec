//! `.mfiles` manifests of installed paths.
//!
//! The list names every staged path exactly once, sorted bytewise, each
//! prefixed with `/` and followed by a newline. Its content depends only on
//! the set of staged paths, never on the order they were added in.

use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use coordmap_common::path::normalize;
use std::collections::BTreeSet;
use std::fs;

/// Base name of file lists; the package suffix is appended.
pub const FILE_LIST_PREFIX: &str = ".mfiles";

/// Return the file name of the list for a package with `suffix`.
#[must_use]
pub fn file_list_name(suffix: &str) -> String {
    format!("{FILE_LIST_PREFIX}{suffix}")
}

/// Turn staged `(directory, name)` pairs into sorted, de-duplicated,
/// `/`-prefixed entries.
#[must_use]
pub fn entries<'a>(
    staged: impl IntoIterator<Item = (&'a Utf8Path, &'a str)>,
) -> BTreeSet<String> {
    staged
        .into_iter()
        .map(|(dir, name)| {
            let relative = normalize(dir.join(name).as_path());
            format!("/{}", relative.as_str().trim_start_matches('/'))
        })
        .collect()
}

/// Render entries as file list text.
#[must_use]
pub fn render(entries: &BTreeSet<String>) -> String {
    entries.iter().fold(String::new(), |mut text, entry| {
        text.push_str(entry);
        text.push('\n');
        text
    })
}

/// Write the file list for `suffix` into `dir` and return its path.
///
/// # Errors
///
/// Returns [`InstallerError::FileList`] if the file cannot be written.
pub fn write(dir: &Utf8Path, suffix: &str, entries: &BTreeSet<String>) -> Result<Utf8PathBuf> {
    let path = dir.join(file_list_name(suffix));
    fs::write(&path, render(entries)).map_err(|source| InstallerError::FileList {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
