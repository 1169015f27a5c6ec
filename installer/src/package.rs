//! Per-package staging and installation.
//!
//! A [`Package`] collects everything one output unit will install: staged
//! files and symlinks, the artifacts it provides for development and runtime
//! use, and the mapping metadata that lets the resolver find them later.
//! Nothing touches the install root until [`Package::install`] consumes the
//! package.

use crate::error::{InstallerError, Result};
use crate::file_list;
use crate::metadata::MetadataDocument;
use crate::rule::PackagingRule;
use crate::settings::InstallerSettings;
use crate::staging::{self, ScratchDir};
use camino::{Utf8Path, Utf8PathBuf};
use coordmap_common::path::{non_empty_parent, normalize, relativize};
use coordmap_common::{Artifact, ArtifactCoordinate};
use indexmap::{IndexMap, IndexSet};
use log::debug;
use std::cmp::Ordering;
use std::fmt;

/// Suffix of the main package.
pub const MAIN_SUFFIX: &str = "";

/// Package name that is an explicit alias for the main package.
pub const DEFAULT_PACKAGE: &str = "__default";

/// Package name whose contents are never installed.
pub const NOINSTALL_PACKAGE: &str = "__noinstall";

/// Mode applied to metadata documents and symlink objects.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Whether a package takes part in installation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Installability {
    /// The package is installed normally.
    Installable,
    /// The package collects artifacts that must not be installed.
    Excluded,
}

/// One file scheduled for installation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetFile {
    source: Utf8PathBuf,
    target_dir: Utf8PathBuf,
    target_name: String,
    mode: u32,
}

impl TargetFile {
    /// Return the file placed at the target.
    #[must_use]
    pub fn source(&self) -> &Utf8Path {
        &self.source
    }

    /// Return the directory, relative to the install root.
    #[must_use]
    pub fn target_dir(&self) -> &Utf8Path {
        &self.target_dir
    }

    /// Return the file name inside the target directory.
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Return the requested permission bits.
    #[must_use]
    pub const fn mode(&self) -> u32 {
        self.mode
    }
}

/// Callback run against a package immediately before it installs.
pub type PreInstallHook = Box<dyn FnOnce(&mut Package) -> Result<()>>;

/// Report of a completed installation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstalledPackage {
    /// Suffix of the installed package.
    pub suffix: String,
    /// Every placed file, under the install root, in staging order.
    pub files: Vec<Utf8PathBuf>,
    /// Installed metadata document, when the package provided any mapping.
    pub metadata: Option<Utf8PathBuf>,
    /// Written file list.
    pub file_list: Utf8PathBuf,
}

/// Files and metadata of one output unit.
pub struct Package {
    suffix: String,
    settings: InstallerSettings,
    target_files: Vec<TargetFile>,
    devel_artifacts: IndexSet<ArtifactCoordinate>,
    user_artifacts: IndexSet<ArtifactCoordinate>,
    provided_artifacts: IndexMap<ArtifactCoordinate, ArtifactCoordinate>,
    metadata: MetadataDocument,
    pre_install_hooks: Vec<PreInstallHook>,
    properties: IndexMap<String, serde_json::Value>,
    scratch: ScratchDir,
}

impl Package {
    /// Create the package named `name`.
    ///
    /// The empty name and [`DEFAULT_PACKAGE`] both denote the main package
    /// with an empty suffix; any other name gets the suffix `-<name>`.
    #[must_use]
    pub fn new(name: &str, settings: InstallerSettings) -> Self {
        let suffix = if name.is_empty() || name == DEFAULT_PACKAGE {
            MAIN_SUFFIX.to_owned()
        } else {
            format!("-{name}")
        };
        Self {
            suffix,
            settings,
            target_files: Vec::new(),
            devel_artifacts: IndexSet::new(),
            user_artifacts: IndexSet::new(),
            provided_artifacts: IndexMap::new(),
            metadata: MetadataDocument::new(),
            pre_install_hooks: Vec::new(),
            properties: IndexMap::new(),
            scratch: ScratchDir::new(),
        }
    }

    /// Return the suffix identifying this package.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Return the directory settings this package installs with.
    #[must_use]
    pub const fn settings(&self) -> &InstallerSettings {
        &self.settings
    }

    /// Return whether this package is installed at all.
    #[must_use]
    pub fn installability(&self) -> Installability {
        if self.suffix.strip_prefix('-') == Some(NOINSTALL_PACKAGE) {
            Installability::Excluded
        } else {
            Installability::Installable
        }
    }

    /// Return `false` only for the no-install package.
    #[must_use]
    pub fn is_installable(&self) -> bool {
        self.installability() == Installability::Installable
    }

    /// Stage `source` to be installed as `target_dir/target_name`.
    pub fn add_file(
        &mut self,
        source: impl Into<Utf8PathBuf>,
        target_dir: impl Into<Utf8PathBuf>,
        target_name: impl Into<String>,
        mode: u32,
    ) {
        self.target_files.push(TargetFile {
            source: source.into(),
            target_dir: target_dir.into(),
            target_name: target_name.into(),
            mode,
        });
    }

    /// Stage `source` to be installed at `target`, a path relative to the
    /// install root. A bare file name installs into the root itself.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::MissingFileName`] when `target` has no final
    /// file name component.
    pub fn add_file_at(
        &mut self,
        source: impl Into<Utf8PathBuf>,
        target: &Utf8Path,
        mode: u32,
    ) -> Result<()> {
        let name = target
            .file_name()
            .ok_or_else(|| InstallerError::MissingFileName {
                path: target.to_owned(),
            })?
            .to_owned();
        let dir = non_empty_parent(target).unwrap_or(Utf8Path::new("."));
        self.add_file(source, dir, name, mode);
        Ok(())
    }

    /// Stage a symlink at `link` pointing to `target`.
    ///
    /// Both paths are relative to the install root. The target is rewritten
    /// relative to the link's directory, so
    /// `add_symlink("usr/share/java/a.jar", "usr/share/java/x/a.jar")`
    /// installs a link reading `x/a.jar`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::AbsolutePath`] for an absolute argument and
    /// [`InstallerError::MissingFileName`] for a link without a file name,
    /// both before anything is created. Returns [`InstallerError::Symlink`]
    /// if the temporary link cannot be created.
    pub fn add_symlink(&mut self, link: &Utf8Path, target: &Utf8Path) -> Result<()> {
        for (role, path) in [("symlink path", link), ("symlink target", target)] {
            if path.is_absolute() {
                return Err(InstallerError::AbsolutePath {
                    role,
                    path: path.to_owned(),
                });
            }
        }

        let link = normalize(link);
        let name = link
            .file_name()
            .ok_or_else(|| InstallerError::MissingFileName { path: link.clone() })?
            .to_owned();
        let dir = non_empty_parent(&link).map(Utf8Path::to_owned);
        let target = match &dir {
            Some(parent) => relativize(parent, target),
            None => normalize(target),
        };

        let object = self.scratch.anonymous_symlink(&target)?;
        debug!("staged symlink {link} -> {target}");
        self.add_file(
            object,
            dir.unwrap_or_else(|| Utf8PathBuf::from(".")),
            name,
            DEFAULT_FILE_MODE,
        );
        Ok(())
    }

    /// Return the staged files in staging order.
    #[must_use]
    pub fn target_files(&self) -> &[TargetFile] {
        &self.target_files
    }

    /// Record an artifact needed only for development.
    pub fn add_devel_artifact(&mut self, artifact: ArtifactCoordinate) {
        self.devel_artifacts.insert(artifact);
    }

    /// Return development artifacts in insertion order.
    #[must_use]
    pub const fn devel_artifacts(&self) -> &IndexSet<ArtifactCoordinate> {
        &self.devel_artifacts
    }

    /// Record an artifact needed at runtime.
    pub fn add_user_artifact(&mut self, artifact: ArtifactCoordinate) {
        self.user_artifacts.insert(artifact);
    }

    /// Return runtime artifacts in insertion order.
    #[must_use]
    pub const fn user_artifacts(&self) -> &IndexSet<ArtifactCoordinate> {
        &self.user_artifacts
    }

    /// Map a built artifact and the rule's aliases onto the packaged
    /// coordinate `target_group:target_name`.
    ///
    /// All coordinates carry the default extension and the source's
    /// `version`. The source keeps its classifier, so a classified build
    /// output never shadows the main artifact.
    pub fn create_depmaps(
        &mut self,
        source: &ArtifactCoordinate,
        target_group: &str,
        target_name: &str,
        rule: &PackagingRule,
    ) {
        let version = source.version().unwrap_or_default();
        let from = ArtifactCoordinate::new(source.group(), source.name())
            .with_classifier(source.classifier().unwrap_or_default())
            .with_version(version);
        let to = ArtifactCoordinate::new(target_group, target_name).with_version(version);

        self.metadata.add_mapping(from, to.clone());
        for alias in &rule.aliases {
            self.metadata.add_mapping(alias.with_extension(""), to.clone());
        }
    }

    /// Record that `artifact` and its `aliases` are provided by each of
    /// `variants`.
    ///
    /// Every variant contributes one entry per requested coordinate, scoped
    /// with the variant's scope. Aliases without a version take the
    /// artifact's version. Files and properties are not part of the
    /// recorded coordinates.
    pub fn add_artifact_metadata(
        &mut self,
        artifact: &Artifact,
        aliases: &[ArtifactCoordinate],
        variants: &[Artifact],
    ) {
        let original = artifact.coordinate();
        let version = original.version().unwrap_or_default();
        for variant in variants {
            let provided = variant.coordinate();
            let scope = provided.scope();
            let requested = std::iter::once(original.clone()).chain(aliases.iter().map(|alias| {
                if alias.version().is_some() {
                    alias.clone()
                } else {
                    alias.with_version(version)
                }
            }));
            for key in requested {
                let key = key.with_scope_of(scope);
                self.provided_artifacts
                    .insert(key.clone(), provided.clone());
                self.metadata.add_mapping(key, provided.clone());
            }
        }
    }

    /// Iterate every coordinate this package provides a mapping for.
    pub fn tracked_artifacts(&self) -> impl Iterator<Item = &ArtifactCoordinate> {
        self.provided_artifacts.keys()
    }

    /// Return the packaged coordinate provided for `requested`, if any.
    #[must_use]
    pub fn provided_artifact(&self, requested: &ArtifactCoordinate) -> Option<&ArtifactCoordinate> {
        self.provided_artifacts.get(requested)
    }

    /// Return the metadata document accumulated so far.
    #[must_use]
    pub const fn metadata(&self) -> &MetadataDocument {
        &self.metadata
    }

    /// Register a hook to run, in registration order, when the package
    /// installs.
    pub fn add_pre_install_hook(&mut self, hook: impl FnOnce(&mut Self) -> Result<()> + 'static) {
        self.pre_install_hooks.push(Box::new(hook));
    }

    /// Attach a free-form property.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Return a property set with [`Package::set_property`].
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// Install the package under `root`.
    ///
    /// Runs the pre-install hooks, stages the metadata document as
    /// `<package_name><suffix>.xml` when it is not empty, places every staged
    /// file, and writes the `.mfiles<suffix>` list into the configured file
    /// list directory. Temporary files are removed when this returns.
    ///
    /// # Errors
    ///
    /// Returns the first hook error, or an [`InstallerError`] naming the path
    /// that could not be written. Files placed before the failure stay in
    /// place.
    pub fn install(mut self, package_name: &str, root: &Utf8Path) -> Result<InstalledPackage> {
        for hook in std::mem::take(&mut self.pre_install_hooks) {
            hook(&mut self)?;
        }

        let metadata = self.stage_metadata(package_name)?;

        let mut files = Vec::with_capacity(self.target_files.len());
        for target in &self.target_files {
            files.push(place(root, target)?);
        }

        let entries = file_list::entries(
            self.target_files
                .iter()
                .map(|target| (target.target_dir(), target.target_name())),
        );
        let file_list = file_list::write(&self.settings.file_list_dir, &self.suffix, &entries)?;
        debug!(
            "installed {} file(s) for package {package_name}{}",
            files.len(),
            self.suffix
        );

        Ok(InstalledPackage {
            suffix: self.suffix,
            files,
            metadata: metadata.map(|relative| root.join(relative)),
            file_list,
        })
    }

    fn stage_metadata(&mut self, package_name: &str) -> Result<Option<Utf8PathBuf>> {
        if self.metadata.is_empty() {
            return Ok(None);
        }
        let scratch = self.scratch.fresh_path("metadata.xml")?;
        self.metadata.write(&scratch)?;

        let name = format!("{package_name}{}.xml", self.suffix);
        let dir = self.settings.metadata_dir.clone();
        let relative = staging::contained(&dir.join(&name))?;
        self.add_file(scratch, dir, name, DEFAULT_FILE_MODE);
        Ok(Some(relative))
    }
}

fn place(root: &Utf8Path, target: &TargetFile) -> Result<Utf8PathBuf> {
    let relative = staging::contained(&target.target_dir.join(&target.target_name))?;
    let dir = non_empty_parent(&relative).unwrap_or(Utf8Path::new("."));
    staging::install_directory(root, dir)?;

    let destination = root.join(&relative);
    staging::link_or_copy(&target.source, &destination)?;
    staging::set_mode(&destination, target.mode)?;
    debug!("placed {} at {destination}", target.source);
    Ok(destination)
}

/// Install `packages` under `root` in suffix order, skipping excluded ones.
///
/// # Errors
///
/// Stops at and returns the first package's installation error.
pub fn install_packages(
    mut packages: Vec<Package>,
    package_name: &str,
    root: &Utf8Path,
) -> Result<Vec<InstalledPackage>> {
    packages.sort();
    packages
        .into_iter()
        .filter(|package| {
            let installable = package.is_installable();
            if !installable {
                debug!("skipping package {package_name}{}", package.suffix);
            }
            installable
        })
        .map(|package| package.install(package_name, root))
        .collect()
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("suffix", &self.suffix)
            .field("target_files", &self.target_files)
            .field("devel_artifacts", &self.devel_artifacts)
            .field("user_artifacts", &self.user_artifacts)
            .field("provided_artifacts", &self.provided_artifacts)
            .field("pre_install_hooks", &self.pre_install_hooks.len())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.suffix == other.suffix
    }
}

impl Eq for Package {}

impl PartialOrd for Package {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Package {
    fn cmp(&self, other: &Self) -> Ordering {
        self.suffix.cmp(&other.suffix)
    }
}

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;
