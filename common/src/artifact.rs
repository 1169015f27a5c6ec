//! Artifact coordinates and artifacts.
//!
//! An [`ArtifactCoordinate`] is the identity key of a build output: group,
//! name, and optional extension, classifier, version, and scope. Coordinates
//! are immutable; every update returns a new value so a coordinate can be
//! shared freely as a map key. An [`Artifact`] pairs a coordinate with the
//! file the build produced and any free-form properties attached to it.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Extension assumed when a coordinate does not name one.
pub const DEFAULT_EXTENSION: &str = "jar";

/// Version token meaning "whatever the system provides".
///
/// Artifacts resolved from the packaging system advertise this as their only
/// version because no repository listing exists to enumerate real versions.
pub const SYSTEM_VERSION: &str = "SYSTEM";

/// Errors raised when a coordinate cannot be built from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// The group identifier is empty.
    #[error("artifact coordinate \"{value}\" has an empty group")]
    EmptyGroup {
        /// The rejected coordinate text.
        value: String,
    },

    /// The artifact name is empty.
    #[error("artifact coordinate \"{value}\" has an empty name")]
    EmptyName {
        /// The rejected coordinate text.
        value: String,
    },

    /// The text does not split into two to five `:`-separated segments.
    #[error(
        "invalid artifact coordinate \"{value}\"; expected group:name[:extension[:classifier]][:version]"
    )]
    Malformed {
        /// The rejected coordinate text.
        value: String,
    },
}

/// Result type alias using [`CoordinateError`].
pub type Result<T> = std::result::Result<T, CoordinateError>;

/// Immutable identity key for a build output.
///
/// Empty optional fields are normalised to `None`, so a coordinate built with
/// `with_version("")` equals one built without a version. The extension is
/// also stored as `None` when it names [`DEFAULT_EXTENSION`], so `g:a:1.0` and
/// `g:a:jar:1.0` are the same key.
///
/// # Examples
///
/// ```
/// use coordmap_common::ArtifactCoordinate;
///
/// let coordinate: ArtifactCoordinate = "org.example:lib:1.0".parse().expect("valid coordinate");
/// assert_eq!(coordinate.group(), "org.example");
/// assert_eq!(coordinate.version(), Some("1.0"));
/// assert_eq!(coordinate.extension(), "jar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct ArtifactCoordinate {
    group: String,
    name: String,
    extension: Option<String>,
    classifier: Option<String>,
    version: Option<String>,
    scope: Option<String>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() { None } else { Some(value) }
}

fn non_default_extension(value: impl Into<String>) -> Option<String> {
    non_empty(value).filter(|extension| extension != DEFAULT_EXTENSION)
}

impl ArtifactCoordinate {
    /// Create a versionless coordinate with the default extension.
    ///
    /// No validation is performed; use [`ArtifactCoordinate::try_new`] or
    /// [`str::parse`] when the group and name come from untrusted input.
    #[must_use]
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            extension: None,
            classifier: None,
            version: None,
            scope: None,
        }
    }

    /// Create a coordinate, rejecting an empty group or name.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::EmptyGroup`] or
    /// [`CoordinateError::EmptyName`] when either part is blank.
    pub fn try_new(group: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let coordinate = Self::new(group, name);
        if coordinate.group.is_empty() {
            return Err(CoordinateError::EmptyGroup {
                value: coordinate.to_string(),
            });
        }
        if coordinate.name.is_empty() {
            return Err(CoordinateError::EmptyName {
                value: coordinate.to_string(),
            });
        }
        Ok(coordinate)
    }

    /// Return the group identifier.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Return the artifact name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the extension, falling back to [`DEFAULT_EXTENSION`].
    #[must_use]
    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    /// Return the extension when it differs from [`DEFAULT_EXTENSION`].
    #[must_use]
    pub fn explicit_extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Return the classifier, if any.
    #[must_use]
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Return the version, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Return the scope, if any.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Return `true` when the version is absent or [`SYSTEM_VERSION`].
    #[must_use]
    pub fn is_system_version(&self) -> bool {
        self.version.as_deref().is_none_or(|v| v == SYSTEM_VERSION)
    }

    /// Return a copy with the version replaced; an empty string clears it.
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: non_empty(version),
            ..self.clone()
        }
    }

    /// Return a copy with the extension replaced; an empty string or
    /// [`DEFAULT_EXTENSION`] clears it.
    #[must_use]
    pub fn with_extension(&self, extension: impl Into<String>) -> Self {
        Self {
            extension: non_default_extension(extension),
            ..self.clone()
        }
    }

    /// Return a copy with the classifier replaced; an empty string clears it.
    #[must_use]
    pub fn with_classifier(&self, classifier: impl Into<String>) -> Self {
        Self {
            classifier: non_empty(classifier),
            ..self.clone()
        }
    }

    /// Return a copy with the scope replaced; an empty string clears it.
    #[must_use]
    pub fn with_scope(&self, scope: impl Into<String>) -> Self {
        Self {
            scope: non_empty(scope),
            ..self.clone()
        }
    }

    /// Return a copy carrying `scope`, which may be absent.
    #[must_use]
    pub fn with_scope_of(&self, scope: Option<&str>) -> Self {
        self.with_scope(scope.unwrap_or_default())
    }

    /// Return a copy without version and extension.
    ///
    /// This is the shape used for mapping keys: two coordinates that differ
    /// only in version or extension map to the same key.
    ///
    /// # Examples
    ///
    /// ```
    /// use coordmap_common::ArtifactCoordinate;
    ///
    /// let a: ArtifactCoordinate = "g:a:pom:1.0".parse().expect("valid");
    /// let b: ArtifactCoordinate = "g:a:2.0".parse().expect("valid");
    /// assert_eq!(a.clear_version_and_extension(), b.clear_version_and_extension());
    /// ```
    #[must_use]
    pub fn clear_version_and_extension(&self) -> Self {
        Self {
            version: None,
            extension: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    /// Formats as `group:name[:extension[:classifier]]:version`, omitting the
    /// extension part when neither extension nor classifier is set and the
    /// version when absent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)?;
        if self.extension.is_some() || self.classifier.is_some() {
            write!(f, ":{}", self.extension())?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        Ok(())
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = CoordinateError;

    /// Parses `group:name`, `group:name:version`,
    /// `group:name:extension:version` or
    /// `group:name:extension:classifier:version`.
    fn from_str(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.trim().split(':').collect();
        let (group, name, extension, classifier, version) = match parts.as_slice() {
            [g, n] => (*g, *n, "", "", ""),
            [g, n, v] => (*g, *n, "", "", *v),
            [g, n, e, v] => (*g, *n, *e, "", *v),
            [g, n, e, c, v] => (*g, *n, *e, *c, *v),
            _ => {
                return Err(CoordinateError::Malformed {
                    value: value.to_owned(),
                });
            }
        };
        let coordinate = Self::try_new(group, name).map_err(|err| match err {
            CoordinateError::EmptyGroup { .. } => CoordinateError::EmptyGroup {
                value: value.to_owned(),
            },
            CoordinateError::EmptyName { .. } => CoordinateError::EmptyName {
                value: value.to_owned(),
            },
            other @ CoordinateError::Malformed { .. } => other,
        })?;
        Ok(coordinate
            .with_extension(extension)
            .with_classifier(classifier)
            .with_version(version))
    }
}

impl TryFrom<String> for ArtifactCoordinate {
    type Error = CoordinateError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<&str> for ArtifactCoordinate {
    type Error = CoordinateError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

/// A build output: a coordinate plus the file and properties attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    coordinate: ArtifactCoordinate,
    file: Option<Utf8PathBuf>,
    properties: BTreeMap<String, String>,
}

impl Artifact {
    /// Wrap a coordinate with no file and no properties.
    #[must_use]
    pub fn new(coordinate: ArtifactCoordinate) -> Self {
        Self {
            coordinate,
            file: None,
            properties: BTreeMap::new(),
        }
    }

    /// Attach the on-disk file produced for this artifact.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<Utf8PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attach a free-form property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Return the coordinate, without file or properties.
    #[must_use]
    pub fn coordinate(&self) -> &ArtifactCoordinate {
        &self.coordinate
    }

    /// Return the attached file, if any.
    #[must_use]
    pub fn file(&self) -> Option<&Utf8Path> {
        self.file.as_deref()
    }

    /// Return the attached properties.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

impl From<ArtifactCoordinate> for Artifact {
    fn from(coordinate: ArtifactCoordinate) -> Self {
        Self::new(coordinate)
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
