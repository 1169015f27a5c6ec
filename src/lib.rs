//! coordmap rewrites build-time artifact coordinates into the coordinates a
//! packaging system provides, and stages build outputs into installable
//! packages.
//!
//! This crate ties the workspace together: [`Configuration`] reads
//! `coordmap.toml`, [`ResolutionContext`] owns the resolver loaded from it and
//! plans projects into packages, and [`WorkspaceReader`] answers artifact
//! queries against the packages being built.

pub mod config;
pub mod context;
pub mod reader;

pub use config::{CONFIG_FILE_NAME, ConfigError, Configuration};
pub use context::ResolutionContext;
pub use reader::{ArtifactLookup, WorkspaceReader};
