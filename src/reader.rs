//! Artifact queries answered from the workspace being packaged.

use coordmap_common::{ArtifactCoordinate, SYSTEM_VERSION};
use coordmap_installer::Package;
use coordmap_resolver::{ResolutionResult, Resolver};
use log::trace;

/// Answers "where is this artifact" and "which versions exist" queries.
pub trait ArtifactLookup {
    /// Locate the file for `coordinate`.
    fn find_artifact(&self, coordinate: &ArtifactCoordinate) -> ResolutionResult;

    /// List the versions available for `coordinate`.
    fn find_versions(&self, coordinate: &ArtifactCoordinate) -> Vec<String>;
}

/// Resolves coordinates, preferring what the packages being built provide.
///
/// A coordinate tracked by one of the packages is first rewritten to the
/// artifact that package provides for it; the first package tracking it
/// wins. The result is then handed to the resolver.
pub struct WorkspaceReader<'a> {
    resolver: &'a dyn Resolver,
    packages: &'a [Package],
}

impl<'a> WorkspaceReader<'a> {
    /// Create a reader over `packages` backed by `resolver`.
    #[must_use]
    pub fn new(resolver: &'a dyn Resolver, packages: &'a [Package]) -> Self {
        Self { resolver, packages }
    }

    fn rewrite(&self, coordinate: &ArtifactCoordinate) -> ArtifactCoordinate {
        self.packages
            .iter()
            .find_map(|package| package.provided_artifact(coordinate))
            .map_or_else(
                || coordinate.clone(),
                |provided| {
                    trace!("{coordinate} is provided as {provided}");
                    provided.clone()
                },
            )
    }
}

impl ArtifactLookup for WorkspaceReader<'_> {
    fn find_artifact(&self, coordinate: &ArtifactCoordinate) -> ResolutionResult {
        self.resolver.resolve(&self.rewrite(coordinate).into())
    }

    /// Always `SYSTEM`: the packaging system offers no version listing.
    fn find_versions(&self, coordinate: &ArtifactCoordinate) -> Vec<String> {
        trace!("versions of {coordinate} requested");
        vec![SYSTEM_VERSION.to_owned()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use coordmap_common::Artifact;
    use coordmap_installer::InstallerSettings;
    use coordmap_resolver::ResolutionRequest;
    use mockall::{mock, predicate::eq};

    mock! {
        Resolver {}
        impl Resolver for Resolver {
            fn resolve(&self, request: &ResolutionRequest) -> ResolutionResult;
        }
    }

    fn coordinate(text: &str) -> ArtifactCoordinate {
        text.parse().expect("valid coordinate")
    }

    fn providing(name: &str, requested: &str, provided: &str) -> Package {
        let mut package = Package::new(name, InstallerSettings::default());
        package.add_artifact_metadata(
            &Artifact::new(coordinate(requested)),
            &[],
            &[Artifact::new(coordinate(provided))],
        );
        package
    }

    #[test]
    fn tracked_coordinate_resolves_as_provided_artifact() {
        let provided = coordinate("JPP/foo:lib:SYSTEM");
        let mut resolver = MockResolver::new();
        resolver
            .expect_resolve()
            .with(eq(ResolutionRequest::new(provided.clone())))
            .times(1)
            .returning(|request| {
                ResolutionResult::found(
                    Utf8PathBuf::from("/usr/share/java/foo/lib.jar"),
                    request.coordinate().clone(),
                    "jpp",
                )
            });
        let packages = [
            providing("", "org.example:lib:1.0", "JPP/foo:lib:SYSTEM"),
            providing("compat", "org.example:lib:1.0", "JPP/compat:lib:SYSTEM"),
        ];

        let reader = WorkspaceReader::new(&resolver, &packages);
        let result = reader.find_artifact(&coordinate("org.example:lib:1.0"));
        assert_eq!(result.resolved(), Some(&provided));
    }

    #[test]
    fn untracked_coordinate_is_resolved_unchanged() {
        let requested = coordinate("org.other:thing:2.0");
        let mut resolver = MockResolver::new();
        resolver
            .expect_resolve()
            .with(eq(ResolutionRequest::new(requested.clone())))
            .times(1)
            .returning(|_| ResolutionResult::unresolved());
        let packages = [providing("", "org.example:lib:1.0", "JPP/foo:lib:SYSTEM")];

        let reader = WorkspaceReader::new(&resolver, &packages);
        assert!(reader.find_artifact(&requested).artifact_file().is_none());
    }

    #[test]
    fn only_the_system_version_is_advertised() {
        let resolver = MockResolver::new();
        let reader = WorkspaceReader::new(&resolver, &[]);
        assert_eq!(
            reader.find_versions(&coordinate("org.example:lib:1.0")),
            [SYSTEM_VERSION]
        );
    }
}
