//! Unit tests for artifact coordinates.

use super::*;
use rstest::rstest;

#[rstest]
#[case::versionless("g:a", None, "jar", None)]
#[case::versioned("g:a:1.0", Some("1.0"), "jar", None)]
#[case::with_extension("g:a:pom:1.0", Some("1.0"), "pom", None)]
#[case::with_classifier("g:a:jar:tests:1.0", Some("1.0"), "jar", Some("tests"))]
fn parses_textual_forms(
    #[case] text: &str,
    #[case] version: Option<&str>,
    #[case] extension: &str,
    #[case] classifier: Option<&str>,
) {
    let coordinate: ArtifactCoordinate = text.parse().expect("valid coordinate");
    assert_eq!(coordinate.group(), "g");
    assert_eq!(coordinate.name(), "a");
    assert_eq!(coordinate.version(), version);
    assert_eq!(coordinate.extension(), extension);
    assert_eq!(coordinate.classifier(), classifier);
}

#[rstest]
#[case::single_segment("lonely")]
#[case::too_many_segments("a:b:c:d:e:f")]
fn rejects_malformed_text(#[case] text: &str) {
    let result: Result<ArtifactCoordinate> = text.parse();
    assert!(matches!(result, Err(CoordinateError::Malformed { .. })));
}

#[rstest]
#[case::empty_group(":a", true)]
#[case::empty_name("g:", false)]
fn rejects_blank_identity(#[case] text: &str, #[case] group_blank: bool) {
    let err = text.parse::<ArtifactCoordinate>().expect_err("blank part");
    if group_blank {
        assert!(matches!(err, CoordinateError::EmptyGroup { .. }));
    } else {
        assert!(matches!(err, CoordinateError::EmptyName { .. }));
    }
    assert!(err.to_string().contains(text));
}

#[test]
fn empty_optional_fields_normalise_to_absent() {
    let plain = ArtifactCoordinate::new("g", "a");
    let cleared = plain
        .with_version("")
        .with_classifier("")
        .with_scope("")
        .with_extension("");
    assert_eq!(plain, cleared);
}

#[rstest]
#[case::parsed("g:a:jar:1.0")]
#[case::classified("g:a:jar:tests:1.0")]
fn default_extension_is_the_same_key_as_none(#[case] text: &str) {
    let spelled: ArtifactCoordinate = text.parse().expect("valid");
    let implicit = ArtifactCoordinate::new("g", "a")
        .with_classifier(spelled.classifier().unwrap_or_default())
        .with_version("1.0");

    assert_eq!(spelled, implicit);
    assert_eq!(spelled.explicit_extension(), None);
    assert_eq!(implicit.with_extension("jar"), implicit);
    assert_eq!(implicit.with_extension("pom").explicit_extension(), Some("pom"));
}

#[test]
fn default_extension_is_omitted_from_display() {
    let coordinate: ArtifactCoordinate = "g:a:jar:1.0".parse().expect("valid");
    assert_eq!(coordinate.to_string(), "g:a:1.0");
}

#[test]
fn functional_updates_leave_the_original_untouched() {
    let original = ArtifactCoordinate::new("g", "a").with_version("1.0");
    let updated = original.with_version("2.0").with_scope("test");

    assert_eq!(original.version(), Some("1.0"));
    assert_eq!(original.scope(), None);
    assert_eq!(updated.version(), Some("2.0"));
    assert_eq!(updated.scope(), Some("test"));
}

#[rstest]
#[case("g:a:1.0", "g:a:war:2.0")]
#[case("g:a", "g:a:pom:SYSTEM")]
fn clearing_version_and_extension_collapses_keys(#[case] left: &str, #[case] right: &str) {
    let left: ArtifactCoordinate = left.parse().expect("valid");
    let right: ArtifactCoordinate = right.parse().expect("valid");
    assert_ne!(left, right);
    assert_eq!(
        left.clear_version_and_extension(),
        right.clear_version_and_extension()
    );
}

#[test]
fn clearing_keeps_classifier_and_scope() {
    let coordinate: ArtifactCoordinate = "g:a:jar:tests:1.0".parse().expect("valid");
    let key = coordinate.with_scope("test").clear_version_and_extension();
    assert_eq!(key.classifier(), Some("tests"));
    assert_eq!(key.scope(), Some("test"));
    assert_eq!(key.explicit_extension(), None);
}

#[rstest]
#[case::absent("g:a", true)]
#[case::system("g:a:SYSTEM", true)]
#[case::concrete("g:a:1.2", false)]
fn detects_system_version(#[case] text: &str, #[case] expected: bool) {
    let coordinate: ArtifactCoordinate = text.parse().expect("valid");
    assert_eq!(coordinate.is_system_version(), expected);
}

#[rstest]
#[case("g:a")]
#[case("g:a:1.0")]
#[case("g:a:pom:1.0")]
#[case("g:a:jar:sources:1.0")]
fn display_matches_canonical_text(#[case] text: &str) {
    let coordinate: ArtifactCoordinate = text.parse().expect("valid");
    assert_eq!(coordinate.to_string(), text);
}

#[test]
fn artifact_projects_to_its_coordinate() {
    let coordinate: ArtifactCoordinate = "g:a:1.0".parse().expect("valid");
    let artifact = Artifact::new(coordinate.clone())
        .with_file("target/a-1.0.jar")
        .with_property("type", "jar");

    assert_eq!(artifact.coordinate(), &coordinate);
    assert_eq!(artifact.file().map(Utf8Path::as_str), Some("target/a-1.0.jar"));
    assert_eq!(artifact.properties().get("type").map(String::as_str), Some("jar"));
}

#[test]
fn deserialises_from_toml_string() {
    #[derive(Debug, Deserialize)]
    struct Holder {
        alias: ArtifactCoordinate,
    }

    let holder: Holder = toml::from_str("alias = \"org.compat:lib:1\"").expect("valid toml");
    assert_eq!(holder.alias.group(), "org.compat");
    assert_eq!(holder.alias.version(), Some("1"));

    let bad: std::result::Result<Holder, _> = toml::from_str("alias = \"nope\"");
    assert!(bad.is_err());
}
