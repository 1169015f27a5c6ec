//! Coordinate resolution against the mapping store and repositories.

use crate::config::ResolverConfig;
use crate::loader::FragmentLoader;
use crate::mapping::MappingStore;
use crate::repository::{self, Repository};
use camino::{Utf8Path, Utf8PathBuf};
use coordmap_common::{ArtifactCoordinate, SYSTEM_VERSION};
use indexmap::IndexSet;
use log::{debug, trace};

/// A request to locate the file of one coordinate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolutionRequest {
    coordinate: ArtifactCoordinate,
}

impl ResolutionRequest {
    /// Request the file for `coordinate`.
    #[must_use]
    pub const fn new(coordinate: ArtifactCoordinate) -> Self {
        Self { coordinate }
    }

    /// Return the requested coordinate.
    #[must_use]
    pub const fn coordinate(&self) -> &ArtifactCoordinate {
        &self.coordinate
    }
}

impl From<ArtifactCoordinate> for ResolutionRequest {
    fn from(coordinate: ArtifactCoordinate) -> Self {
        Self::new(coordinate)
    }
}

/// Outcome of a resolution request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResolutionResult {
    artifact_file: Option<Utf8PathBuf>,
    resolved: Option<ArtifactCoordinate>,
    namespace: Option<String>,
}

impl ResolutionResult {
    /// A result that found nothing.
    #[must_use]
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// A result pointing at `file`, found for `resolved` in `namespace`.
    #[must_use]
    pub fn found(
        file: Utf8PathBuf,
        resolved: ArtifactCoordinate,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            artifact_file: Some(file),
            resolved: Some(resolved),
            namespace: Some(namespace.into()),
        }
    }

    /// Return the located file, if any.
    #[must_use]
    pub fn artifact_file(&self) -> Option<&Utf8Path> {
        self.artifact_file.as_deref()
    }

    /// Return the coordinate whose file was found.
    #[must_use]
    pub const fn resolved(&self) -> Option<&ArtifactCoordinate> {
        self.resolved.as_ref()
    }

    /// Return the namespace of the repository holding the file.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

/// Locates artifact files for coordinates.
pub trait Resolver {
    /// Resolve `request` to a file on disk.
    fn resolve(&self, request: &ResolutionRequest) -> ResolutionResult;
}

/// Resolver combining the mapping store with an ordered repository list.
///
/// For each request it tries the coordinate the store rewrites it to, then
/// the requested coordinate itself; each first with its concrete version and
/// then with `SYSTEM`. Every candidate is probed against every repository in
/// order and the first existing file wins.
pub struct DefaultResolver {
    store: MappingStore,
    repositories: Vec<Box<dyn Repository>>,
}

impl DefaultResolver {
    /// Create a resolver over an already-built store.
    #[must_use]
    pub fn new(store: MappingStore, repositories: Vec<Box<dyn Repository>>) -> Self {
        Self {
            store,
            repositories,
        }
    }

    /// Load the store and build the repositories described by `config`.
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        let store = FragmentLoader::from_config(config).load();
        debug!("mapping store holds {} entries", store.len());
        let repositories = config
            .repositories
            .iter()
            .map(|repository| repository::from_config(&config.root, repository))
            .collect();
        Self::new(store, repositories)
    }

    /// Return the mapping store consulted by this resolver.
    #[must_use]
    pub const fn store(&self) -> &MappingStore {
        &self.store
    }

    /// Return the coordinates probed for `requested`, in order.
    #[must_use]
    pub fn candidates(&self, requested: &ArtifactCoordinate) -> Vec<ArtifactCoordinate> {
        let mapped = self.store.get(requested).map(|target| {
            target
                .with_extension(requested.explicit_extension().unwrap_or_default())
                .with_scope_of(requested.scope())
        });

        let mut candidates = IndexSet::new();
        for base in mapped.iter().chain(std::iter::once(requested)) {
            if let Some(version) = requested.version() {
                candidates.insert(base.with_version(version));
            }
            candidates.insert(base.with_version(SYSTEM_VERSION));
        }
        candidates.into_iter().collect()
    }
}

impl Resolver for DefaultResolver {
    fn resolve(&self, request: &ResolutionRequest) -> ResolutionResult {
        let requested = request.coordinate();
        for candidate in self.candidates(requested) {
            for repository in &self.repositories {
                let path = repository.primary_artifact_path(&candidate);
                trace!("probing {} for {candidate}", path.path());
                if path.path().is_file() {
                    debug!("resolved {requested} to {}", path.path());
                    return ResolutionResult::found(
                        path.path().to_owned(),
                        candidate,
                        path.namespace(),
                    );
                }
            }
        }
        debug!("could not resolve {requested}");
        ResolutionResult::unresolved()
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
