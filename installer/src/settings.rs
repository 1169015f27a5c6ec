//! Installer directory settings.

use camino::Utf8PathBuf;
use serde::Deserialize;

/// Where installed files land, relative to the install root.
///
/// Deserialised from the `[installer]` table of the workspace configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerSettings {
    /// Base name of the packages being built; also names the directory
    /// holding their JAR files.
    pub package_name: String,
    /// Directory receiving each package's metadata document.
    pub metadata_dir: Utf8PathBuf,
    /// Directory receiving JAR files.
    pub jar_dir: Utf8PathBuf,
    /// Directory receiving POM files.
    pub pom_dir: Utf8PathBuf,
    /// Directory the `.mfiles` lists are written to. Not under the root.
    pub file_list_dir: Utf8PathBuf,
}

impl InstallerSettings {
    fn default_package_name() -> String {
        String::new()
    }

    fn default_metadata_dir() -> Utf8PathBuf {
        Utf8PathBuf::from("usr/share/maven-metadata")
    }

    fn default_jar_dir() -> Utf8PathBuf {
        Utf8PathBuf::from("usr/share/java")
    }

    fn default_pom_dir() -> Utf8PathBuf {
        Utf8PathBuf::from("usr/share/maven-poms")
    }

    fn default_file_list_dir() -> Utf8PathBuf {
        Utf8PathBuf::from(".")
    }
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            package_name: Self::default_package_name(),
            metadata_dir: Self::default_metadata_dir(),
            jar_dir: Self::default_jar_dir(),
            pom_dir: Self::default_pom_dir(),
            file_list_dir: Self::default_file_list_dir(),
        }
    }
}
