//! Error types for fragment parsing and loading.
//!
//! Fragment failures are never fatal to a load: the loader reports them as
//! warnings and moves on to the next file. The types still carry enough
//! context (path, dependency index, offending element) for the warning to
//! point at the problem.

use camino::Utf8PathBuf;
use coordmap_common::CoordinateError;
use thiserror::Error;

/// Side of a `<dependency>` element a coordinate was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The `<maven>` element naming the build-time coordinate.
    Maven,
    /// The `<jpp>` element naming the packaged coordinate.
    Jpp,
}

impl Side {
    /// Return the element name for this side.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Jpp => "jpp",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Errors raised while parsing the text of one fragment.
#[derive(Debug, Error)]
pub enum FragmentParseError {
    /// The wrapped fragment is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A dependency does not name the build-time artifact it rewrites.
    #[error("dependency #{index} has no <maven> coordinate")]
    MissingSource {
        /// One-based position of the dependency in the fragment.
        index: usize,
    },

    /// A coordinate element has the wrong number of children of one kind.
    #[error("<{side}> of dependency #{index} must contain {expected} <{element}>, found {found}")]
    Cardinality {
        /// One-based position of the dependency in the fragment.
        index: usize,
        /// Side the element belongs to.
        side: Side,
        /// Child element that was counted.
        element: &'static str,
        /// Human description of the accepted count.
        expected: &'static str,
        /// Number of children actually present.
        found: usize,
    },

    /// The group or name text does not form a valid coordinate.
    #[error("<{side}> of dependency #{index} is not a valid coordinate: {source}")]
    InvalidCoordinate {
        /// One-based position of the dependency in the fragment.
        index: usize,
        /// Side the element belongs to.
        side: Side,
        /// Underlying validation failure.
        #[source]
        source: CoordinateError,
    },
}

/// Errors raised while loading one fragment file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The fragment could not be read.
    #[error("could not read depmap file {path}: {source}")]
    Read {
        /// Path of the fragment.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The fragment was read but could not be parsed.
    #[error("could not process depmap file {path}: {source}")]
    Parse {
        /// Path of the fragment.
        path: Utf8PathBuf,
        /// Underlying parse failure.
        #[source]
        source: FragmentParseError,
    },
}

impl LoadError {
    /// Return the path of the fragment that failed.
    #[must_use]
    pub fn path(&self) -> &camino::Utf8Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
