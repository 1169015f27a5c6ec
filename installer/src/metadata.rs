//! Package mapping metadata.
//!
//! Each package records the coordinates it provides as a depmap document,
//! installed alongside its files. The document uses the same
//! `<dependency><maven/><jpp/></dependency>` shape as the fragments the
//! resolver loads, so installed metadata feeds straight back into
//! resolution.

use camino::{Utf8Path, Utf8PathBuf};
use coordmap_common::ArtifactCoordinate;
use indexmap::IndexSet;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use thiserror::Error;

const ROOT_ELEMENT: &str = "dependencyMap";

/// Errors raised while producing a metadata document.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The document could not be serialised.
    #[error("failed to serialise metadata: {reason}")]
    Serialize {
        /// Description of the serialisation failure.
        reason: String,
    },

    /// The serialised document could not be written.
    #[error("failed to write metadata to {path}")]
    Write {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Insertion-ordered set of `from → to` mappings provided by a package.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MetadataDocument {
    mappings: IndexSet<(ArtifactCoordinate, ArtifactCoordinate)>,
}

impl MetadataDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `from` is provided as `to`. Duplicate pairs are ignored.
    pub fn add_mapping(&mut self, from: ArtifactCoordinate, to: ArtifactCoordinate) {
        self.mappings.insert((from, to));
    }

    /// Return `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Return the number of recorded mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Iterate mappings in insertion order.
    pub fn mappings(&self) -> impl Iterator<Item = (&ArtifactCoordinate, &ArtifactCoordinate)> {
        self.mappings.iter().map(|(from, to)| (from, to))
    }

    /// Serialise the document to XML text.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Serialize`] if the XML writer fails.
    pub fn to_xml(&self) -> Result<String, MetadataError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        start(&mut writer, ROOT_ELEMENT)?;
        for (from, to) in &self.mappings {
            start(&mut writer, "dependency")?;
            write_coordinate(&mut writer, "maven", from)?;
            write_coordinate(&mut writer, "jpp", to)?;
            end(&mut writer, "dependency")?;
        }
        end(&mut writer, ROOT_ELEMENT)?;

        let mut text = String::from_utf8(writer.into_inner()).map_err(|e| {
            MetadataError::Serialize {
                reason: e.to_string(),
            }
        })?;
        text.push('\n');
        Ok(text)
    }

    /// Write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] if serialisation or the write fails.
    pub fn write(&self, path: &Utf8Path) -> Result<(), MetadataError> {
        let text = self.to_xml()?;
        fs::write(path, text).map_err(|source| MetadataError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

fn write_coordinate(
    writer: &mut Writer<Vec<u8>>,
    side: &str,
    coordinate: &ArtifactCoordinate,
) -> Result<(), MetadataError> {
    start(writer, side)?;
    text_element(writer, "groupId", coordinate.group())?;
    text_element(writer, "artifactId", coordinate.name())?;
    let optional = [
        ("version", coordinate.version()),
        ("extension", coordinate.explicit_extension()),
        ("classifier", coordinate.classifier()),
        ("scope", coordinate.scope()),
    ];
    for (tag, value) in optional {
        if let Some(value) = value {
            text_element(writer, tag, value)?;
        }
    }
    end(writer, side)
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    value: &str,
) -> Result<(), MetadataError> {
    start(writer, tag)?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    end(writer, tag)
}

fn start(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), MetadataError> {
    emit(writer, Event::Start(BytesStart::new(tag)))
}

fn end(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), MetadataError> {
    emit(writer, Event::End(BytesEnd::new(tag)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), MetadataError> {
    writer
        .write_event(event)
        .map_err(|e| MetadataError::Serialize {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(text: &str) -> ArtifactCoordinate {
        text.parse().expect("valid coordinate")
    }

    #[test]
    fn duplicate_mappings_are_recorded_once() {
        let mut document = MetadataDocument::new();
        document.add_mapping(coordinate("g:a"), coordinate("JPP:a"));
        document.add_mapping(coordinate("g:b"), coordinate("JPP:a"));
        document.add_mapping(coordinate("g:a"), coordinate("JPP:a"));

        assert_eq!(document.len(), 2);
        let froms: Vec<String> = document.mappings().map(|(from, _)| from.to_string()).collect();
        assert_eq!(froms, ["g:a", "g:b"]);
    }

    #[test]
    fn xml_lists_optional_fields_only_when_present() {
        let mut document = MetadataDocument::new();
        document.add_mapping(
            coordinate("g:a:1.0").with_scope("test"),
            coordinate("JPP/x:a:pom:tests:2"),
        );
        let xml = document.to_xml().expect("serialise");

        assert!(xml.starts_with("<dependencyMap>"));
        assert!(!xml.contains("<?xml"));
        assert!(xml.contains("<groupId>g</groupId>"));
        assert!(xml.contains("<version>1.0</version>"));
        assert!(xml.contains("<scope>test</scope>"));
        assert!(xml.contains("<groupId>JPP/x</groupId>"));
        assert!(xml.contains("<extension>pom</extension>"));
        assert!(xml.contains("<classifier>tests</classifier>"));
        assert_eq!(xml.matches("<extension>").count(), 1);
    }

    #[test]
    fn text_is_escaped() {
        let mut document = MetadataDocument::new();
        document.add_mapping(coordinate("a&b:c<d"), coordinate("JPP:x"));
        let xml = document.to_xml().expect("serialise");
        assert!(xml.contains("a&amp;b"));
        assert!(xml.contains("c&lt;d"));
    }

    #[test]
    fn empty_document_is_empty() {
        let document = MetadataDocument::new();
        assert!(document.is_empty());
        let xml = document.to_xml().expect("serialise");
        assert!(xml.contains("</dependencyMap>"));
        assert!(!xml.contains("<dependency>"));
    }

    #[test]
    fn write_reports_the_destination() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("missing/meta.xml"))
            .expect("utf-8 temp path");
        let err = MetadataDocument::new()
            .write(&path)
            .expect_err("parent does not exist");
        assert!(err.to_string().contains("meta.xml"));
    }
}
