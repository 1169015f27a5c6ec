//! Depmap fragment parsing.
//!
//! A fragment is a sequence of `<dependency>` elements without a single root
//! element of its own:
//!
//! ```xml
//! <dependency>
//!   <maven><groupId>org.apache</groupId><artifactId>commons-lang</artifactId></maven>
//!   <jpp><groupId>JPP</groupId><artifactId>commons-lang</artifactId></jpp>
//! </dependency>
//! ```
//!
//! The text is wrapped in a synthetic `<dependencies>` root before parsing so
//! several snippets can be authored without boilerplate. Elements are found
//! by local name anywhere below their parent, so a fragment that already
//! carries its own root (such as the metadata documents written at install
//! time) parses the same way.

use crate::error::{FragmentParseError, Side};
use crate::mapping::MappingEntry;
use coordmap_common::ArtifactCoordinate;
use roxmltree::{Document, Node};

const OPENING_TAG: &str = "<dependencies>";
const CLOSING_TAG: &str = "</dependencies>";

/// Parse the text of one fragment into mapping entries.
///
/// Entries come back in document order with version and extension already
/// cleared. A dependency without a `<jpp>` side maps its coordinate onto
/// itself, which overrides any lower-precedence rewrite without introducing
/// a new one.
///
/// # Errors
///
/// Returns [`FragmentParseError`] when the wrapped text is not well-formed,
/// when a dependency has no `<maven>` side, or when a side has the wrong
/// number of `groupId` or `artifactId` children, or more than one
/// `version`, `extension`, `classifier`, or `scope`.
///
/// # Examples
///
/// ```
/// use coordmap_resolver::fragment::parse_fragment;
///
/// let text = "<dependency><maven><groupId>g</groupId><artifactId>a</artifactId>\
///             <version>1.0</version></maven><jpp><groupId>JPP</groupId>\
///             <artifactId>a</artifactId></jpp></dependency>";
/// let entries = parse_fragment(text).expect("valid fragment");
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].from.to_string(), "g:a");
/// assert_eq!(entries[0].to.to_string(), "JPP:a");
/// ```
pub fn parse_fragment(text: &str) -> Result<Vec<MappingEntry>, FragmentParseError> {
    let wrapped = wrap_fragment(text);
    let document = Document::parse(&wrapped)?;

    document
        .descendants()
        .filter(|node| node.has_tag_name("dependency"))
        .enumerate()
        .map(|(position, dependency)| parse_dependency(dependency, position + 1))
        .collect()
}

/// Wrap fragment text in the synthetic root element.
///
/// A leading byte-order mark and XML declaration are dropped first; either
/// would be illegal once the text is no longer at the start of the document.
#[must_use]
pub fn wrap_fragment(text: &str) -> String {
    let body = strip_declaration(text.trim_start_matches('\u{feff}'));
    let mut buffer = String::with_capacity(OPENING_TAG.len() + body.len() + CLOSING_TAG.len());
    buffer.push_str(OPENING_TAG);
    buffer.push_str(body);
    buffer.push_str(CLOSING_TAG);
    buffer
}

fn strip_declaration(text: &str) -> &str {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("<?xml") {
        return text;
    }
    trimmed
        .find("?>")
        .and_then(|end| trimmed.get(end + 2..))
        .unwrap_or(text)
}

fn parse_dependency(
    dependency: Node<'_, '_>,
    index: usize,
) -> Result<MappingEntry, FragmentParseError> {
    let from = coordinate_definition(dependency, Side::Maven, index)?
        .ok_or(FragmentParseError::MissingSource { index })?;
    let to = coordinate_definition(dependency, Side::Jpp, index)?.unwrap_or_else(|| from.clone());

    Ok(MappingEntry::new(
        from.clear_version_and_extension(),
        to.clear_version_and_extension(),
    ))
}

/// Read the coordinate declared under the first `side` element, or `None`
/// when the dependency has no such element.
fn coordinate_definition(
    dependency: Node<'_, '_>,
    side: Side,
    index: usize,
) -> Result<Option<ArtifactCoordinate>, FragmentParseError> {
    let Some(element) = first_descendant(dependency, side.tag()) else {
        return Ok(None);
    };

    let group = single_text(element, side, "groupId", index)?;
    let name = single_text(element, side, "artifactId", index)?;
    let version = optional_text(element, side, "version", index)?;
    let extension = optional_text(element, side, "extension", index)?;
    let classifier = optional_text(element, side, "classifier", index)?;
    let scope = optional_text(element, side, "scope", index)?;

    let coordinate = ArtifactCoordinate::try_new(group, name)
        .map_err(|source| FragmentParseError::InvalidCoordinate {
            index,
            side,
            source,
        })?
        .with_version(version.unwrap_or_default())
        .with_extension(extension.unwrap_or_default())
        .with_classifier(classifier.unwrap_or_default())
        .with_scope(scope.unwrap_or_default());
    Ok(Some(coordinate))
}

fn first_descendant<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|candidate| candidate.has_tag_name(tag))
}

fn matching_children<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Vec<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .filter(|candidate| candidate.has_tag_name(tag))
        .collect()
}

fn single_text(
    element: Node<'_, '_>,
    side: Side,
    tag: &'static str,
    index: usize,
) -> Result<String, FragmentParseError> {
    match matching_children(element, tag).as_slice() {
        [only] => Ok(text_content(*only)),
        other => Err(FragmentParseError::Cardinality {
            index,
            side,
            element: tag,
            expected: "exactly one",
            found: other.len(),
        }),
    }
}

fn optional_text(
    element: Node<'_, '_>,
    side: Side,
    tag: &'static str,
    index: usize,
) -> Result<Option<String>, FragmentParseError> {
    match matching_children(element, tag).as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(text_content(*only))),
        other => Err(FragmentParseError::Cardinality {
            index,
            side,
            element: tag,
            expected: "at most one",
            found: other.len(),
        }),
    }
}

/// Concatenate every text node below `node` and trim the result.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect::<String>()
        .trim()
        .to_owned()
}

#[cfg(test)]
#[path = "fragment_tests.rs"]
mod tests;
