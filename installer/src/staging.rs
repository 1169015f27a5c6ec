//! Placing staged files under an install root.
//!
//! Files are hard-linked into place when possible and copied otherwise.
//! Symlink sources are recreated rather than followed, so a staged symlink
//! installs as a symlink.

use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use coordmap_common::path::{escapes_root, normalize};
use log::debug;
use std::fs;
use tempfile::TempDir;

/// Resolve `target_dir` inside `root` and create it.
///
/// An absolute `target_dir` is re-rooted under `root`.
///
/// # Errors
///
/// Returns [`InstallerError::PathEscapesRoot`] when the directory climbs out
/// of the root and [`InstallerError::CreateDirectory`] when it cannot be
/// created.
pub fn install_directory(root: &Utf8Path, target_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let relative = contained(target_dir)?;
    let dir = root.join(relative);
    fs::create_dir_all(&dir).map_err(|source| InstallerError::CreateDirectory {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Return `path` stripped of any leading `/` and normalised, refusing paths
/// that leave the directory they are joined onto.
///
/// # Errors
///
/// Returns [`InstallerError::PathEscapesRoot`] for paths escaping through
/// `..`.
pub fn contained(path: &Utf8Path) -> Result<Utf8PathBuf> {
    let relative = Utf8Path::new(path.as_str().trim_start_matches('/'));
    if escapes_root(relative) {
        return Err(InstallerError::PathEscapesRoot {
            path: path.to_owned(),
        });
    }
    Ok(normalize(relative))
}

/// Link `source` to `target`, falling back to a copy.
///
/// An existing non-directory `target` is removed first so installing twice
/// replaces rather than fails.
///
/// # Errors
///
/// Returns [`InstallerError::PlaceFile`] if the old target cannot be removed
/// or neither linking nor copying succeeds.
pub fn link_or_copy(source: &Utf8Path, target: &Utf8Path) -> Result<()> {
    let place_error = |err: std::io::Error| InstallerError::PlaceFile {
        source_path: source.to_owned(),
        target: target.to_owned(),
        source: err,
    };

    if let Ok(existing) = target.symlink_metadata() {
        if !existing.is_dir() {
            fs::remove_file(target).map_err(place_error)?;
        }
    }

    match fs::hard_link(source, target) {
        Ok(()) => Ok(()),
        Err(err) => {
            debug!("hard link {source} -> {target} failed ({err}); copying");
            copy(source, target).map_err(place_error)
        }
    }
}

fn copy(source: &Utf8Path, target: &Utf8Path) -> std::io::Result<()> {
    if source.symlink_metadata()?.file_type().is_symlink() {
        let link = fs::read_link(source)?;
        return symlink(&link, target.as_std_path());
    }
    fs::copy(source, target).map(|_| ())
}

/// Apply POSIX permission bits to `path`. Symlinks are left untouched.
///
/// # Errors
///
/// Returns [`InstallerError::SetMode`] if the permissions cannot be read or
/// changed.
pub fn set_mode(path: &Utf8Path, mode: u32) -> Result<()> {
    let mode_error = |source| InstallerError::SetMode {
        path: path.to_owned(),
        mode,
        source,
    };
    let metadata = path.symlink_metadata().map_err(mode_error)?;
    if metadata.file_type().is_symlink() {
        return Ok(());
    }
    apply_mode(path, metadata.permissions(), mode).map_err(mode_error)
}

#[cfg(unix)]
fn apply_mode(path: &Utf8Path, mut permissions: fs::Permissions, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    permissions.set_mode(mode);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn apply_mode(path: &Utf8Path, mut permissions: fs::Permissions, mode: u32) -> std::io::Result<()> {
    permissions.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, permissions)
}

#[cfg(unix)]
fn symlink(target: &std::path::Path, link: &std::path::Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn symlink(_target: &std::path::Path, _link: &std::path::Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are only supported on Unix",
    ))
}

/// Scratch directory owned by a package.
///
/// Holds temporary symlink objects and the serialised metadata document
/// until they are placed. Created on first use; removed when dropped.
#[derive(Debug, Default)]
pub struct ScratchDir {
    dir: Option<TempDir>,
    counter: usize,
}

impl ScratchDir {
    /// Create an empty scratch area. No directory exists until first use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dir: None,
            counter: 0,
        }
    }

    /// Return a fresh path inside the scratch directory.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Io`] if the directory cannot be created or
    /// its path is not UTF-8.
    pub fn fresh_path(&mut self, name: &str) -> Result<Utf8PathBuf> {
        let base = self.base()?;
        self.counter += 1;
        Ok(base.join(format!("{:04}-{name}", self.counter)))
    }

    /// Create a symlink pointing at `target` and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Symlink`] if the link cannot be created.
    pub fn anonymous_symlink(&mut self, target: &Utf8Path) -> Result<Utf8PathBuf> {
        let path = self.fresh_path("link")?;
        symlink(target.as_std_path(), path.as_std_path()).map_err(|source| {
            InstallerError::Symlink {
                path: path.clone(),
                target: target.to_owned(),
                source,
            }
        })?;
        Ok(path)
    }

    fn base(&mut self) -> Result<Utf8PathBuf> {
        if self.dir.is_none() {
            self.dir = Some(tempfile::Builder::new().prefix("coordmap-").tempdir()?);
        }
        let dir = self
            .dir
            .as_ref()
            .map(TempDir::path)
            .ok_or_else(|| std::io::Error::other("scratch directory unavailable"))?;
        Utf8PathBuf::from_path_buf(dir.to_path_buf()).map_err(|path| {
            InstallerError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("scratch directory {} is not UTF-8", path.display()),
            ))
        })
    }
}

#[cfg(test)]
#[path = "staging_tests.rs"]
mod tests;
