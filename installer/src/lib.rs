//! coordmap installer library.
//!
//! This crate stages build outputs into named packages and installs them
//! under a root directory, together with the metadata documents that let the
//! resolver find them again and the `.mfiles` lists naming every installed
//! path.
//!
//! # Modules
//!
//! - [`error`] - Installation error types
//! - [`file_list`] - `.mfiles` manifest rendering
//! - [`metadata`] - Dependency map documents written beside packages
//! - [`package`] - Package staging and installation
//! - [`project`] - Installers for JAR and POM projects
//! - [`rule`] - Packaging rules selecting targets, aliases, and versions
//! - [`settings`] - Install directory settings
//! - [`staging`] - Filesystem placement helpers

pub mod error;
pub mod file_list;
pub mod metadata;
pub mod package;
pub mod project;
pub mod rule;
pub mod settings;
pub mod staging;

pub use error::{InstallerError, Result};
pub use metadata::{MetadataDocument, MetadataError};
pub use package::{
    DEFAULT_PACKAGE, Installability, InstalledPackage, NOINSTALL_PACKAGE, Package, TargetFile,
    install_packages,
};
pub use project::{JarInstaller, PomInstaller, Project, ProjectInstaller, install_project};
pub use rule::PackagingRule;
pub use settings::InstallerSettings;
