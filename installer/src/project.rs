//! Installing built projects into packages.
//!
//! A [`ProjectInstaller`] knows how to stage the output of projects with
//! particular packaging types. JAR-like projects install their archive and
//! register what it provides; POM projects install the descriptor only.

use crate::error::{InstallerError, Result};
use crate::package::{DEFAULT_FILE_MODE, Package};
use crate::rule::PackagingRule;
use crate::settings::InstallerSettings;
use crate::staging::contained;
use camino::Utf8Path;
use coordmap_common::{Artifact, ArtifactCoordinate, SYSTEM_VERSION};
use log::debug;

const JPP_GROUP: &str = "JPP";

/// A built project ready for installation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    artifact: Artifact,
    packaging: String,
}

impl Project {
    /// Describe a project producing `artifact` with the given packaging type.
    #[must_use]
    pub fn new(artifact: Artifact, packaging: impl Into<String>) -> Self {
        Self {
            artifact,
            packaging: packaging.into(),
        }
    }

    /// Return the built artifact.
    #[must_use]
    pub const fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Return the project coordinate.
    #[must_use]
    pub fn coordinate(&self) -> &ArtifactCoordinate {
        self.artifact.coordinate()
    }

    /// Return the packaging type, such as `jar` or `pom`.
    #[must_use]
    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    fn file(&self) -> Result<&Utf8Path> {
        self.artifact
            .file()
            .ok_or_else(|| InstallerError::MissingArtifactFile {
                project: self.coordinate().to_string(),
            })
    }
}

/// Stages projects of specific packaging types into a package.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectInstaller {
    /// Return the packaging types this installer handles.
    fn supported_packaging_types(&self) -> &'static [&'static str];

    /// Install `project` into `package` following `rule`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UnsupportedPackaging`] for a packaging type
    /// outside [`ProjectInstaller::supported_packaging_types`],
    /// [`InstallerError::MissingArtifactFile`] when the project has no file,
    /// or any staging error.
    fn install_project(
        &self,
        project: &Project,
        package: &mut Package,
        rule: &PackagingRule,
    ) -> Result<()>;

    /// Return `true` when this installer handles `packaging`.
    fn supports(&self, packaging: &str) -> bool {
        self.supported_packaging_types().contains(&packaging)
    }
}

/// Install `project` with the first installer supporting its packaging.
///
/// # Errors
///
/// Returns [`InstallerError::UnsupportedPackaging`] when no installer
/// supports the project, or the chosen installer's error.
pub fn install_project(
    installers: &[&dyn ProjectInstaller],
    project: &Project,
    package: &mut Package,
    rule: &PackagingRule,
) -> Result<()> {
    let installer = installers
        .iter()
        .find(|installer| installer.supports(project.packaging()))
        .ok_or_else(|| unsupported(project))?;
    installer.install_project(project, package, rule)
}

fn unsupported(project: &Project) -> InstallerError {
    InstallerError::UnsupportedPackaging {
        project: project.coordinate().to_string(),
        packaging: project.packaging().to_owned(),
    }
}

fn ensure_supported(installer: &dyn ProjectInstaller, project: &Project) -> Result<()> {
    if installer.supports(project.packaging()) {
        Ok(())
    } else {
        Err(unsupported(project))
    }
}

/// Packaged group for artifacts of `package_name`: `JPP/<name>`, or plain
/// `JPP` when the name is empty.
#[must_use]
pub fn target_group(package_name: &str) -> String {
    if package_name.is_empty() {
        JPP_GROUP.to_owned()
    } else {
        format!("{JPP_GROUP}/{package_name}")
    }
}

/// Installs JAR-producing projects.
///
/// The archive lands in `<jar_dir>/<package_name>/<name>.jar`, or
/// `<name>-<classifier>.jar` for a classified artifact. Each alternative file
/// name in the rule becomes a symlink `<jar_dir>/<file>.jar` pointing at it.
#[derive(Clone, Debug, Default)]
pub struct JarInstaller {
    settings: InstallerSettings,
}

impl JarInstaller {
    /// Create an installer placing files according to `settings`.
    #[must_use]
    pub const fn new(settings: InstallerSettings) -> Self {
        Self { settings }
    }
}

impl ProjectInstaller for JarInstaller {
    fn supported_packaging_types(&self) -> &'static [&'static str] {
        &["jar", "bundle", "maven-plugin"]
    }

    fn install_project(
        &self,
        project: &Project,
        package: &mut Package,
        rule: &PackagingRule,
    ) -> Result<()> {
        ensure_supported(self, project)?;
        let file = project.file()?;
        let coordinate = project.coordinate();
        let group = target_group(&self.settings.package_name);
        let name = match coordinate.classifier() {
            Some(classifier) => format!("{}-{classifier}", coordinate.name()),
            None => coordinate.name().to_owned(),
        };

        let jar_dir = contained(&self.settings.jar_dir)?;
        let dir = if self.settings.package_name.is_empty() {
            jar_dir.clone()
        } else {
            jar_dir.join(&self.settings.package_name)
        };
        let file_name = format!("{name}.jar");
        let main = dir.join(&file_name);
        package.add_file(file, dir, file_name, DEFAULT_FILE_MODE);
        for alternative in &rule.files {
            package.add_symlink(&jar_dir.join(format!("{alternative}.jar")), &main)?;
        }

        package.create_depmaps(coordinate, &group, &name, rule);

        let versions = if rule.versions.is_empty() {
            vec![SYSTEM_VERSION.to_owned()]
        } else {
            rule.versions.clone()
        };
        let variants: Vec<Artifact> = versions
            .iter()
            .map(|version| {
                Artifact::new(ArtifactCoordinate::new(&group, &name).with_version(version))
            })
            .collect();
        package.add_artifact_metadata(project.artifact(), &rule.aliases, &variants);
        package.add_user_artifact(coordinate.clone());

        debug!("staged {coordinate} as {main}");
        Ok(())
    }
}

/// Installs POM-only projects.
///
/// The descriptor lands in `<pom_dir>/JPP.<package_name>-<name>.pom`, the
/// layout a flat repository expects.
#[derive(Clone, Debug, Default)]
pub struct PomInstaller {
    settings: InstallerSettings,
}

impl PomInstaller {
    /// Create an installer placing files according to `settings`.
    #[must_use]
    pub const fn new(settings: InstallerSettings) -> Self {
        Self { settings }
    }
}

impl ProjectInstaller for PomInstaller {
    fn supported_packaging_types(&self) -> &'static [&'static str] {
        &["pom"]
    }

    fn install_project(
        &self,
        project: &Project,
        package: &mut Package,
        rule: &PackagingRule,
    ) -> Result<()> {
        ensure_supported(self, project)?;
        let file = project.file()?;
        let coordinate = project.coordinate();
        let group = target_group(&self.settings.package_name);
        let name = coordinate.name();

        let pom_dir = contained(&self.settings.pom_dir)?;
        let file_name = format!("{}-{name}.pom", group.replace('/', "."));
        package.add_file(file, pom_dir.clone(), file_name.as_str(), DEFAULT_FILE_MODE);

        package.create_depmaps(coordinate, &group, name, rule);
        package.add_devel_artifact(coordinate.with_extension("pom"));

        debug!("staged {coordinate} as {}", pom_dir.join(&file_name));
        Ok(())
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
