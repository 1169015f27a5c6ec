//! Artifact repository layouts.
//!
//! A repository turns a coordinate into the path its primary file would
//! have on disk. Repositories do not touch the filesystem; the resolver
//! probes the paths they compute.

use crate::config::{RepositoryConfig, RepositoryLayout};
use camino::{Utf8Path, Utf8PathBuf};
use coordmap_common::ArtifactCoordinate;

const JPP_PREFIX: &str = "JPP/";

/// Location of an artifact inside a repository.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepositoryPath {
    namespace: String,
    path: Utf8PathBuf,
}

impl RepositoryPath {
    /// Create a repository path.
    #[must_use]
    pub fn new(namespace: impl Into<String>, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Return the namespace of the repository that produced the path.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Return the path, including the repository base directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Maps coordinates to artifact paths.
#[cfg_attr(test, mockall::automock)]
pub trait Repository {
    /// Return the namespace identifying this repository.
    fn namespace(&self) -> &str;

    /// Compute where the primary file of `coordinate` lives.
    ///
    /// A missing or `SYSTEM` version produces the versionless file name.
    fn primary_artifact_path(&self, coordinate: &ArtifactCoordinate) -> RepositoryPath;
}

/// Repository keeping every artifact in one directory.
///
/// The group becomes part of the file name, with `/` turned into `.`:
/// `JPP/foo:bar:jar:1.0` is stored as `JPP.foo-bar-1.0.jar`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlatRepository {
    namespace: String,
    base: Utf8PathBuf,
}

impl FlatRepository {
    /// Create a flat repository rooted at `base`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, base: impl Into<Utf8PathBuf>) -> Self {
        Self {
            namespace: namespace.into(),
            base: base.into(),
        }
    }
}

impl Repository for FlatRepository {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn primary_artifact_path(&self, coordinate: &ArtifactCoordinate) -> RepositoryPath {
        let prefix = format!(
            "{}-{}",
            coordinate.group().replace('/', "."),
            coordinate.name()
        );
        let file_name = file_name(&prefix, coordinate);
        RepositoryPath::new(&self.namespace, self.base.join(file_name))
    }
}

/// Repository with one directory per group.
///
/// The conventional `JPP` group prefix is dropped, so `JPP/foo:bar` lives in
/// `foo/` and plain `JPP:bar` lives directly in the base directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JppRepository {
    namespace: String,
    base: Utf8PathBuf,
}

impl JppRepository {
    /// Create a per-group repository rooted at `base`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, base: impl Into<Utf8PathBuf>) -> Self {
        Self {
            namespace: namespace.into(),
            base: base.into(),
        }
    }
}

impl Repository for JppRepository {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn primary_artifact_path(&self, coordinate: &ArtifactCoordinate) -> RepositoryPath {
        let group = coordinate.group();
        let directory = if group == "JPP" {
            ""
        } else {
            group.strip_prefix(JPP_PREFIX).unwrap_or(group)
        };
        let file_name = file_name(coordinate.name(), coordinate);
        RepositoryPath::new(&self.namespace, self.base.join(directory).join(file_name))
    }
}

fn file_name(prefix: &str, coordinate: &ArtifactCoordinate) -> String {
    let mut name = prefix.to_owned();
    if let Some(version) = coordinate.version().filter(|_| !coordinate.is_system_version()) {
        name.push('-');
        name.push_str(version);
    }
    if let Some(classifier) = coordinate.classifier() {
        name.push('-');
        name.push_str(classifier);
    }
    name.push('.');
    name.push_str(coordinate.extension());
    name
}

/// Build the repository described by `config`, rooted under `root`.
#[must_use]
pub fn from_config(root: &Utf8Path, config: &RepositoryConfig) -> Box<dyn Repository> {
    let base = root.join(config.path.strip_prefix("/").unwrap_or(&config.path));
    let namespace = config.path.as_str();
    match config.layout {
        RepositoryLayout::Flat => Box::new(FlatRepository::new(namespace, base)),
        RepositoryLayout::Jpp => Box::new(JppRepository::new(namespace, base)),
    }
}
