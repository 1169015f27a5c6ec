//! Resolver configuration.
//!
//! Deserialised from the `[resolver]` table of the workspace configuration
//! file. Every field has a default, so an empty table describes the standard
//! system layout.

use camino::Utf8PathBuf;
use serde::Deserialize;

/// Layout of an artifact repository on disk.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryLayout {
    /// Every artifact in one directory, group and name joined into the
    /// file name.
    Flat,
    /// One directory per group below the base, `JPP` prefix dropped.
    Jpp,
}

/// One repository probed by the resolver.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// How artifact paths are laid out.
    pub layout: RepositoryLayout,
    /// Base directory, resolved against the resolver root.
    pub path: Utf8PathBuf,
}

impl RepositoryConfig {
    /// Describe a repository.
    #[must_use]
    pub fn new(layout: RepositoryLayout, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            layout,
            path: path.into(),
        }
    }
}

/// Where fragments and repositories live.
///
/// Relative versionless, directory, and repository paths resolve against
/// `root`; the local override resolves against the working directory.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Prefix applied to the system-wide paths.
    pub root: Utf8PathBuf,
    /// System-wide fragment holding the global defaults.
    pub versionless_depmap: Utf8PathBuf,
    /// Directories of fragments, in precedence order.
    pub fragment_dirs: Vec<Utf8PathBuf>,
    /// User-writable override fragment.
    pub local_depmap: Utf8PathBuf,
    /// Repositories probed in order when resolving a coordinate.
    pub repositories: Vec<RepositoryConfig>,
}

impl ResolverConfig {
    fn default_root() -> Utf8PathBuf {
        Utf8PathBuf::from("/")
    }

    fn default_versionless_depmap() -> Utf8PathBuf {
        Utf8PathBuf::from("etc/maven/maven2-versionless-depmap.xml")
    }

    fn default_fragment_dirs() -> Vec<Utf8PathBuf> {
        vec![
            Utf8PathBuf::from("etc/maven/fragments"),
            Utf8PathBuf::from("usr/share/maven-fragments"),
        ]
    }

    fn default_local_depmap() -> Utf8PathBuf {
        Utf8PathBuf::from(".coordmap/depmap.xml")
    }

    fn default_repositories() -> Vec<RepositoryConfig> {
        vec![
            RepositoryConfig::new(RepositoryLayout::Jpp, "usr/share/java"),
            RepositoryConfig::new(RepositoryLayout::Flat, "usr/share/maven-poms"),
        ]
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            versionless_depmap: Self::default_versionless_depmap(),
            fragment_dirs: Self::default_fragment_dirs(),
            local_depmap: Self::default_local_depmap(),
            repositories: Self::default_repositories(),
        }
    }
}
