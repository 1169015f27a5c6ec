//! Unit tests for staging primitives.

use super::*;
use rstest::{fixture, rstest};

struct Sandbox {
    _dir: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn sandbox() -> Sandbox {
    let dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    Sandbox { _dir: dir, root }
}

#[rstest]
#[case::relative("usr/share/java", "usr/share/java")]
#[case::absolute("/usr/share/java", "usr/share/java")]
#[case::dotted("./usr/./lib/../share", "usr/share")]
#[case::current(".", ".")]
fn contained_reroots_and_normalises(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(
        contained(Utf8Path::new(input)).expect("contained path"),
        expected
    );
}

#[rstest]
#[case::leading_parent("../etc")]
#[case::nested_parent("usr/../../etc")]
#[case::absolute_parent("/../../etc")]
fn contained_rejects_escapes(#[case] input: &str) {
    let err = contained(Utf8Path::new(input)).expect_err("escapes");
    assert!(matches!(err, InstallerError::PathEscapesRoot { .. }));
}

#[rstest]
fn install_directory_creates_nested_dirs(sandbox: Sandbox) {
    let dir = install_directory(&sandbox.root, Utf8Path::new("/usr/share/java")).expect("created");
    assert_eq!(dir, sandbox.root.join("usr/share/java"));
    assert!(dir.is_dir());
}

#[rstest]
fn link_or_copy_places_identical_content(sandbox: Sandbox) {
    let source = sandbox.root.join("source.jar");
    fs::write(&source, b"payload").expect("write source");
    let target = sandbox.root.join("target.jar");

    link_or_copy(&source, &target).expect("placed");
    assert_eq!(fs::read(&target).expect("read target"), b"payload");
}

#[rstest]
fn link_or_copy_replaces_existing_target(sandbox: Sandbox) {
    let source = sandbox.root.join("source.jar");
    fs::write(&source, b"new").expect("write source");
    let target = sandbox.root.join("target.jar");
    fs::write(&target, b"old").expect("write stale target");

    link_or_copy(&source, &target).expect("placed");
    link_or_copy(&source, &target).expect("placed twice");
    assert_eq!(fs::read(&target).expect("read target"), b"new");
}

#[rstest]
fn link_or_copy_reports_missing_source(sandbox: Sandbox) {
    let err = link_or_copy(&sandbox.root.join("absent"), &sandbox.root.join("target"))
        .expect_err("nothing to place");
    assert!(matches!(err, InstallerError::PlaceFile { .. }));
    assert!(err.to_string().contains("absent"));
}

#[cfg(unix)]
#[rstest]
fn set_mode_applies_permission_bits(sandbox: Sandbox) {
    use std::os::unix::fs::PermissionsExt;

    let path = sandbox.root.join("script");
    fs::write(&path, b"#!/bin/sh\n").expect("write file");
    set_mode(&path, 0o755).expect("mode applied");
    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[cfg(unix)]
#[rstest]
fn anonymous_symlinks_install_as_symlinks(sandbox: Sandbox) {
    let mut scratch = ScratchDir::new();
    let link = scratch
        .anonymous_symlink(Utf8Path::new("../java/foo.jar"))
        .expect("symlink created");
    let target = sandbox.root.join("foo.jar");

    link_or_copy(&link, &target).expect("placed");
    set_mode(&target, 0o644).expect("mode skipped for symlinks");

    let placed = fs::read_link(&target).expect("target is a symlink");
    assert_eq!(placed, std::path::Path::new("../java/foo.jar"));
}

#[test]
fn scratch_dir_is_removed_on_drop() {
    let mut scratch = ScratchDir::new();
    let path = scratch.fresh_path("metadata.xml").expect("fresh path");
    fs::write(&path, b"<dependencyMap/>").expect("write scratch file");
    let parent = path.parent().expect("scratch parent").to_owned();
    assert!(parent.is_dir());

    drop(scratch);
    assert!(!parent.exists());
}

#[test]
fn scratch_paths_are_unique() {
    let mut scratch = ScratchDir::new();
    let first = scratch.fresh_path("link").expect("first");
    let second = scratch.fresh_path("link").expect("second");
    assert_ne!(first, second);
}
