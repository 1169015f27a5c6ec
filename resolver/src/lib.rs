//! Artifact mapping resolution.
//!
//! Build-time coordinates are rewritten to packaged coordinates using depmap
//! fragments collected from three precedence tiers, then located on disk in
//! an ordered list of repositories.
//!
//! # Modules
//!
//! - [`config`] - Fragment locations and repository list
//! - [`error`] - Fragment parse and load failures
//! - [`fragment`] - Parsing of root-less depmap fragments
//! - [`loader`] - Tiered fragment loading into a store
//! - [`mapping`] - Ordered source-to-target coordinate store
//! - [`repository`] - Flat and per-group repository layouts
//! - [`resolve`] - Coordinate resolution against store and repositories

pub mod config;
pub mod error;
pub mod fragment;
pub mod loader;
pub mod mapping;
pub mod repository;
pub mod resolve;

pub use config::{RepositoryConfig, RepositoryLayout, ResolverConfig};
pub use error::{FragmentParseError, LoadError};
pub use loader::{FragmentLoader, FragmentSource};
pub use mapping::{MappingEntry, MappingStore};
pub use repository::{FlatRepository, JppRepository, Repository, RepositoryPath};
pub use resolve::{DefaultResolver, ResolutionRequest, ResolutionResult, Resolver};
