//! Tiered fragment loading.
//!
//! Fragments are read from three tiers, lowest precedence first:
//!
//! 1. the versionless system-wide depmap,
//! 2. each fragment directory, entries in sorted filename order,
//! 3. the local override depmap, when it exists.
//!
//! Later fragments override earlier ones for the same key. A fragment that
//! cannot be read or parsed is reported with `log::warn!` and skipped as a
//! whole; the rest of the load carries on.

use crate::config::ResolverConfig;
use crate::error::LoadError;
use crate::fragment::parse_fragment;
use crate::mapping::{MappingEntry, MappingStore};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use std::fs;

/// One place fragments are read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FragmentSource {
    /// A fragment that is expected to exist; failing to read it is reported.
    File(Utf8PathBuf),
    /// A directory whose entries are read in sorted filename order. A missing
    /// directory contributes nothing.
    Directory(Utf8PathBuf),
    /// A fragment read only when it exists.
    OptionalFile(Utf8PathBuf),
}

/// Reads fragments from an ordered list of sources into a [`MappingStore`].
#[derive(Clone, Debug, Default)]
pub struct FragmentLoader {
    sources: Vec<FragmentSource>,
}

impl FragmentLoader {
    /// Create a loader over `sources`, lowest precedence first.
    #[must_use]
    pub const fn new(sources: Vec<FragmentSource>) -> Self {
        Self { sources }
    }

    /// Build the standard three-tier loader described by `config`.
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        let mut sources = vec![FragmentSource::File(
            config.root.join(&config.versionless_depmap),
        )];
        sources.extend(
            config
                .fragment_dirs
                .iter()
                .map(|dir| FragmentSource::Directory(config.root.join(dir))),
        );
        sources.push(FragmentSource::OptionalFile(config.local_depmap.clone()));
        Self::new(sources)
    }

    /// Return the configured sources.
    #[must_use]
    pub fn sources(&self) -> &[FragmentSource] {
        &self.sources
    }

    /// Expand the sources into the ordered list of fragment files to read.
    ///
    /// Directory entries are sorted by name so the merge order does not
    /// depend on filesystem enumeration order.
    #[must_use]
    pub fn fragment_files(&self) -> Vec<Utf8PathBuf> {
        self.sources
            .iter()
            .flat_map(|source| match source {
                FragmentSource::File(path) => vec![path.clone()],
                FragmentSource::Directory(dir) => directory_fragments(dir),
                FragmentSource::OptionalFile(path) if path.exists() => vec![path.clone()],
                FragmentSource::OptionalFile(path) => {
                    debug!("no local depmap at {path}");
                    Vec::new()
                }
            })
            .collect()
    }

    /// Load every fragment into a fresh store.
    ///
    /// Each fragment is applied whole or not at all; failures are logged as
    /// warnings.
    #[must_use]
    pub fn load(&self) -> MappingStore {
        self.fragment_files()
            .iter()
            .fold(MappingStore::new(), |mut store, path| {
                match read_fragment(path) {
                    Ok(entries) => {
                        debug!("loaded {} mapping(s) from {path}", entries.len());
                        store.extend(entries);
                    }
                    Err(err) => warn!("{err}"),
                }
                store
            })
    }
}

/// Read and parse one fragment file.
///
/// # Errors
///
/// Returns [`LoadError::Read`] when the file cannot be read as UTF-8 text
/// and [`LoadError::Parse`] when its contents are not a valid fragment.
pub fn read_fragment(path: &Utf8Path) -> Result<Vec<MappingEntry>, LoadError> {
    debug!("loading depmap file {path}");
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_fragment(&text).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })
}

fn directory_fragments(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let Ok(entries) = dir.read_dir_utf8() else {
        debug!("fragment directory {dir} is not readable; skipping");
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.file_name().to_owned()),
            Err(err) => {
                warn!("skipping entry in fragment directory {dir}: {err}");
                None
            }
        })
        .collect();
    names.sort();
    names.into_iter().map(|name| dir.join(name)).collect()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
