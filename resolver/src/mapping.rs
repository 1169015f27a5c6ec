//! Ordered source-to-target coordinate store.
//!
//! Keys and values are stored with version and extension cleared, so a
//! lookup matches on group, name, classifier, and scope only. Inserting an
//! existing key replaces its target while keeping the key's original
//! position; this is how higher-precedence fragments override lower ones.

use coordmap_common::ArtifactCoordinate;
use indexmap::IndexMap;

/// One `from → to` rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Build-time coordinate being rewritten.
    pub from: ArtifactCoordinate,
    /// Packaged coordinate it resolves to.
    pub to: ArtifactCoordinate,
}

impl MappingEntry {
    /// Create an entry.
    #[must_use]
    pub const fn new(from: ArtifactCoordinate, to: ArtifactCoordinate) -> Self {
        Self { from, to }
    }
}

/// Insertion-ordered map from build-time to packaged coordinates.
///
/// # Examples
///
/// ```
/// use coordmap_common::ArtifactCoordinate;
/// use coordmap_resolver::mapping::MappingStore;
///
/// let mut store = MappingStore::new();
/// let from: ArtifactCoordinate = "org.apache:commons:1.0".parse().expect("valid");
/// store.put(&from, &"JPP:commons-lang".parse().expect("valid"));
/// store.put(&from, &"JPP:commons-lang3".parse().expect("valid"));
///
/// let to = store.get(&"org.apache:commons:2.0".parse().expect("valid"));
/// assert_eq!(to.map(ArtifactCoordinate::name), Some("commons-lang3"));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingStore {
    entries: IndexMap<ArtifactCoordinate, ArtifactCoordinate>,
}

impl MappingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or override the mapping for `from`.
    pub fn put(&mut self, from: &ArtifactCoordinate, to: &ArtifactCoordinate) {
        self.entries.insert(
            from.clear_version_and_extension(),
            to.clear_version_and_extension(),
        );
    }

    /// Look up the target for `from`, ignoring its version and extension.
    #[must_use]
    pub fn get(&self, from: &ArtifactCoordinate) -> Option<&ArtifactCoordinate> {
        self.entries.get(&from.clear_version_and_extension())
    }

    /// Return the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when no mapping has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate mappings in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactCoordinate, &ArtifactCoordinate)> {
        self.entries.iter()
    }
}

impl Extend<MappingEntry> for MappingStore {
    fn extend<I: IntoIterator<Item = MappingEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.put(&entry.from, &entry.to);
        }
    }
}

impl FromIterator<MappingEntry> for MappingStore {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(text: &str) -> ArtifactCoordinate {
        text.parse().expect("valid coordinate")
    }

    #[test]
    fn later_insert_overrides_earlier() {
        let store: MappingStore = [
            MappingEntry::new(coordinate("g:a"), coordinate("g:x")),
            MappingEntry::new(coordinate("g:b"), coordinate("g:z")),
            MappingEntry::new(coordinate("g:a:1.0"), coordinate("g:y")),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.get(&coordinate("g:a")), Some(&coordinate("g:y")));
        assert_eq!(store.len(), 2);
        let keys: Vec<String> = store.iter().map(|(from, _)| from.to_string()).collect();
        assert_eq!(keys, ["g:a", "g:b"]);
    }

    #[test]
    fn lookup_ignores_version_and_extension() {
        let mut store = MappingStore::new();
        store.put(&coordinate("g:a:pom:1.0"), &coordinate("JPP:a:3.0"));

        let to = store.get(&coordinate("g:a:war:7")).expect("mapped");
        assert_eq!(to, &coordinate("JPP:a"));
        assert_eq!(to.version(), None);
    }

    #[test]
    fn lookup_respects_classifier() {
        let mut store = MappingStore::new();
        store.put(&coordinate("g:a"), &coordinate("JPP:a"));

        assert!(store.get(&coordinate("g:a:jar:tests:1.0")).is_none());
        assert!(store.get(&coordinate("g:other")).is_none());
    }

    #[test]
    fn empty_store_reports_empty() {
        let store = MappingStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
