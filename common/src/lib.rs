//! Shared model for coordmap crates: artifact coordinates, artifacts, and
//! lexical helpers for relative install paths.

pub mod artifact;
pub mod path;

pub use artifact::{
    Artifact, ArtifactCoordinate, CoordinateError, DEFAULT_EXTENSION, SYSTEM_VERSION,
};
