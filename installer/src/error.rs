//! Error types for package staging and installation.
//!
//! Every variant that comes from the filesystem names the path involved so
//! a failed install pass can be diagnosed from the message alone. Errors are
//! fatal to the install pass of the package that raised them; files already
//! placed are left where they are.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::metadata::MetadataError;

/// Errors that can occur while staging or installing a package.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// A symlink path or target was absolute where a relative one is needed.
    #[error("{role} must be a relative path: {path}")]
    AbsolutePath {
        /// Which argument was rejected.
        role: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },

    /// A target path has no final file name component.
    #[error("target path {path} has no file name")]
    MissingFileName {
        /// The offending path.
        path: Utf8PathBuf,
    },

    /// A staged file would be placed outside the install root.
    #[error("target {path} escapes the install root")]
    PathEscapesRoot {
        /// The offending target path, relative to the root.
        path: Utf8PathBuf,
    },

    /// A target directory could not be created.
    #[error("failed to create directory {path}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A staged file could not be linked or copied into place.
    #[error("failed to place {source_path} at {target}")]
    PlaceFile {
        /// File being installed.
        source_path: Utf8PathBuf,
        /// Destination inside the install root.
        target: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Permission bits could not be applied to an installed file.
    #[error("failed to set mode {mode:o} on {path}")]
    SetMode {
        /// Installed file.
        path: Utf8PathBuf,
        /// Requested permission bits.
        mode: u32,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A temporary symlink could not be created.
    #[error("failed to create symlink {path} -> {target}")]
    Symlink {
        /// Location of the symlink object.
        path: Utf8PathBuf,
        /// Target the symlink points to.
        target: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The package metadata document could not be written.
    #[error("failed to write package metadata")]
    Metadata(#[from] MetadataError),

    /// The file list could not be written.
    #[error("failed to write file list {path}")]
    FileList {
        /// File list path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No installer handles the project's packaging type.
    #[error("project {project} has unsupported packaging type {packaging}")]
    UnsupportedPackaging {
        /// Coordinate of the project.
        project: String,
        /// Packaging type declared by the project.
        packaging: String,
    },

    /// The project has no built file to install.
    #[error("project {project} has no artifact file")]
    MissingArtifactFile {
        /// Coordinate of the project.
        project: String,
    },

    /// A pre-install hook or other step failed with a plain I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;
