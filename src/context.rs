//! Explicit state shared by one resolution and installation session.
//!
//! A [`ResolutionContext`] owns the loaded configuration and the resolver
//! built from it. The mapping store inside the resolver is loaded once when
//! the context is created and never changes afterwards; callers thread the
//! context through instead of reaching for global state.

use crate::config::Configuration;
use crate::reader::WorkspaceReader;
use camino::Utf8Path;
use coordmap_installer::{
    DEFAULT_PACKAGE, InstalledPackage, JarInstaller, Package, PomInstaller, Project,
    install_packages, install_project,
};
use coordmap_resolver::{DefaultResolver, MappingStore};
use indexmap::IndexMap;
use log::debug;

/// Configuration plus the resolver built from it.
pub struct ResolutionContext {
    configuration: Configuration,
    resolver: DefaultResolver,
}

impl ResolutionContext {
    /// Load fragments and repositories described by `configuration`.
    #[must_use]
    pub fn new(configuration: Configuration) -> Self {
        let resolver = DefaultResolver::from_config(&configuration.resolver);
        Self::with_resolver(configuration, resolver)
    }

    /// Pair `configuration` with an already-built resolver.
    #[must_use]
    pub const fn with_resolver(configuration: Configuration, resolver: DefaultResolver) -> Self {
        Self {
            configuration,
            resolver,
        }
    }

    /// Return the configuration.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Return the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &DefaultResolver {
        &self.resolver
    }

    /// Return the loaded mapping store.
    #[must_use]
    pub const fn store(&self) -> &MappingStore {
        self.resolver.store()
    }

    /// Stage `projects` into packages.
    ///
    /// Each project goes to the package named by its effective packaging
    /// rule, or the main package when no rule names one. An empty name also
    /// means the main package. Packages come back in first-use order.
    ///
    /// # Errors
    ///
    /// Returns the first project installation error.
    pub fn plan(&self, projects: &[Project]) -> coordmap_installer::Result<Vec<Package>> {
        let settings = &self.configuration.installer;
        let jar = JarInstaller::new(settings.clone());
        let pom = PomInstaller::new(settings.clone());
        let mut packages: IndexMap<String, Package> = IndexMap::new();

        for project in projects {
            let rule = self.configuration.effective_rule(project.coordinate());
            let name = rule
                .target_package
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_PACKAGE);
            let package = packages
                .entry(name.to_owned())
                .or_insert_with(|| Package::new(name, settings.clone()));
            install_project(&[&jar, &pom], project, package, &rule)?;
            debug!(
                "planned {} into package {}{}",
                project.coordinate(),
                settings.package_name,
                package.suffix()
            );
        }
        Ok(packages.into_values().collect())
    }

    /// Install `packages` under `root` using the configured package name.
    ///
    /// # Errors
    ///
    /// Returns the first package installation error.
    pub fn install(
        &self,
        packages: Vec<Package>,
        root: &Utf8Path,
    ) -> coordmap_installer::Result<Vec<InstalledPackage>> {
        install_packages(packages, &self.configuration.installer.package_name, root)
    }

    /// Build a reader answering artifact queries for `packages`.
    #[must_use]
    pub fn reader<'a>(&'a self, packages: &'a [Package]) -> WorkspaceReader<'a> {
        WorkspaceReader::new(&self.resolver, packages)
    }
}
