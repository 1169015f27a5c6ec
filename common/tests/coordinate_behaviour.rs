//! Behaviour-driven tests for coordinate identity and mapping keys.

use coordmap_common::{ArtifactCoordinate, CoordinateError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct CoordinateWorld {
    first: Option<ArtifactCoordinate>,
    second: Option<ArtifactCoordinate>,
    keys: Option<(ArtifactCoordinate, ArtifactCoordinate)>,
    text: Option<String>,
    parse_error: Option<CoordinateError>,
}

#[fixture]
fn world() -> CoordinateWorld {
    CoordinateWorld::default()
}

#[given("a coordinate \"{text}\"")]
fn given_coordinate(world: &mut CoordinateWorld, text: String) {
    world.first = Some(text.parse().expect("test coordinate"));
}

#[given("another coordinate \"{text}\"")]
fn given_other_coordinate(world: &mut CoordinateWorld, text: String) {
    world.second = Some(text.parse().expect("test coordinate"));
}

#[given("the coordinate text \"{text}\"")]
fn given_text(world: &mut CoordinateWorld, text: String) {
    world.text = Some(text);
}

#[when("both are cleared for use as mapping keys")]
fn when_cleared(world: &mut CoordinateWorld) {
    let first = world.first.as_ref().expect("first coordinate set");
    let second = world.second.as_ref().expect("second coordinate set");
    world.keys = Some((
        first.clear_version_and_extension(),
        second.clear_version_and_extension(),
    ));
}

#[when("the text is parsed")]
fn when_parsed(world: &mut CoordinateWorld) {
    let text = world.text.as_deref().expect("text set");
    world.parse_error = text.parse::<ArtifactCoordinate>().err();
}

#[then("the keys are equal")]
fn then_keys_equal(world: &mut CoordinateWorld) {
    let (left, right) = world.keys.as_ref().expect("keys computed");
    assert_eq!(left, right);
}

#[then("the keys differ")]
fn then_keys_differ(world: &mut CoordinateWorld) {
    let (left, right) = world.keys.as_ref().expect("keys computed");
    assert_ne!(left, right);
}

#[then("parsing fails with a malformed coordinate error")]
fn then_malformed(world: &mut CoordinateWorld) {
    assert!(matches!(
        world.parse_error,
        Some(CoordinateError::Malformed { .. })
    ));
}

#[scenario(
    path = "tests/features/coordinates.feature",
    name = "Coordinates differing only in version and extension share a key"
)]
fn scenario_shared_key(world: CoordinateWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/coordinates.feature",
    name = "Coordinates differing in classifier keep distinct keys"
)]
fn scenario_distinct_classifier(world: CoordinateWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/coordinates.feature",
    name = "Malformed coordinate text is rejected"
)]
fn scenario_malformed_text(world: CoordinateWorld) {
    let _ = world;
}
