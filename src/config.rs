//! Workspace configuration loaded from `coordmap.toml`.
//!
//! The file has three parts: a `[resolver]` table describing the fragment
//! tiers and repositories, an `[installer]` table naming the install
//! directories, and an ordered `[[rules]]` array of packaging rules. Every
//! field is optional and unknown keys are rejected, so a typo surfaces as an
//! error instead of silently falling back to a default.

use camino::{Utf8Path, Utf8PathBuf};
use coordmap_common::ArtifactCoordinate;
use coordmap_installer::{InstallerSettings, PackagingRule};
use coordmap_resolver::ResolverConfig;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::io;
use thiserror::Error;

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "coordmap.toml";

/// Errors raised while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or does not match the expected shape.
    #[error("invalid configuration {origin}: {source}")]
    Parse {
        /// Path of the file, or `<inline>` for in-memory text.
        origin: String,
        /// Underlying deserialisation error.
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Result type alias using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Complete workspace configuration.
///
/// # Examples
///
/// ```
/// use coordmap::Configuration;
///
/// let config = Configuration::from_toml_str(
///     "[installer]\npackage_name = \"foo\"\n\n[[rules]]\nartifact = \"org.example:*\"\n",
/// )
/// .expect("valid configuration");
/// assert_eq!(config.installer.package_name, "foo");
/// assert_eq!(config.rules.len(), 1);
/// assert_eq!(config.resolver.root, "/");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Fragment tiers and repositories.
    pub resolver: ResolverConfig,
    /// Install directories and package name.
    pub installer: InstallerSettings,
    /// Packaging rules, consulted in order.
    pub rules: Vec<PackagingRule>,
}

impl Configuration {
    /// Parse configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        parse(text, "<inline>")
    }

    /// Read and parse the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, including
    /// when it does not exist, and [`ConfigError::Parse`] when it is invalid.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        parse(&text, path.as_str())
    }

    /// Like [`Configuration::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] for I/O failures other than a missing
    /// file and [`ConfigError::Parse`] when the file is invalid.
    pub fn load_or_default(path: &Utf8Path) -> Result<Self> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!("no configuration at {path}; using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Merge the rules applying to `coordinate`.
    #[must_use]
    pub fn effective_rule(&self, coordinate: &ArtifactCoordinate) -> PackagingRule {
        PackagingRule::effective(&self.rules, coordinate)
    }
}

fn parse(text: &str, origin: &str) -> Result<Configuration> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        origin: origin.to_owned(),
        source: Box::new(source),
    })
}
