//! Packaging rules.
//!
//! A rule tells the installer how to treat the artifacts it matches: which
//! package receives them, which extra coordinates they answer to, which
//! alternative file names they are reachable under, and which compatibility
//! versions they provide.

use coordmap_common::ArtifactCoordinate;
use serde::Deserialize;

/// How one selection of artifacts is packaged.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingRule {
    /// `group:name` selector; either part may be `*`. `None` matches all.
    pub artifact: Option<String>,
    /// Suffix of the package receiving matched artifacts.
    pub target_package: Option<String>,
    /// Extra coordinates resolving to the same packaged artifact.
    pub aliases: Vec<ArtifactCoordinate>,
    /// Alternative file names, installed as symlinks to the main file.
    pub files: Vec<String>,
    /// Compatibility versions provided alongside `SYSTEM`.
    pub versions: Vec<String>,
}

impl PackagingRule {
    /// Return `true` when this rule applies to `coordinate`.
    ///
    /// A malformed selector (anything but `group:name`) matches nothing.
    #[must_use]
    pub fn matches(&self, coordinate: &ArtifactCoordinate) -> bool {
        let Some(selector) = self.artifact.as_deref() else {
            return true;
        };
        let Some((group, name)) = selector.split_once(':') else {
            return false;
        };
        if name.contains(':') {
            return false;
        }
        part_matches(group, coordinate.group()) && part_matches(name, coordinate.name())
    }

    /// Merge the rules applying to `coordinate` into one.
    ///
    /// Rules are consulted in order. The first matching rule that sets a
    /// target package wins; aliases, files, and versions accumulate without
    /// duplicates.
    #[must_use]
    pub fn effective<'a>(
        rules: impl IntoIterator<Item = &'a Self>,
        coordinate: &ArtifactCoordinate,
    ) -> Self {
        let mut effective = Self {
            artifact: Some(format!("{}:{}", coordinate.group(), coordinate.name())),
            ..Self::default()
        };
        for rule in rules.into_iter().filter(|rule| rule.matches(coordinate)) {
            if effective.target_package.is_none() {
                effective.target_package.clone_from(&rule.target_package);
            }
            extend_unique(&mut effective.aliases, &rule.aliases);
            extend_unique(&mut effective.files, &rule.files);
            extend_unique(&mut effective.versions, &rule.versions);
        }
        effective
    }
}

fn part_matches(pattern: &str, value: &str) -> bool {
    pattern.is_empty() || pattern == "*" || pattern == value
}

fn extend_unique<T: Clone + PartialEq>(into: &mut Vec<T>, from: &[T]) {
    for item in from {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}
