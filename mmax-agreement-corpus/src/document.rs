//! MMAX XML documents.
//!
//! Markable and basedata files declare a DTD, which has to be allowed
//! explicitly when parsing.

use mmax_agreement::AnnotatedElement;
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse XML text with DTD declarations allowed.
pub fn parse_xml(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options)
}

/// An XML element seen through its attributes.
#[derive(Debug, Clone, Copy)]
pub struct XmlElement<'a, 'input>(pub Node<'a, 'input>);

impl AnnotatedElement for XmlElement<'_, '_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.0.attribute(name)
    }

    fn attributes(&self) -> BTreeMap<String, String> {
        self.0
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect()
    }
}

/// All elements of a document in document order.
pub fn elements<'a, 'input>(
    document: &'a Document<'input>,
) -> impl Iterator<Item = XmlElement<'a, 'input>> {
    document
        .descendants()
        .filter(|node| node.is_element())
        .map(XmlElement)
}

/// Read a markable file. Unreadable files count as missing.
pub fn read_annotation(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!("cannot read {}: {}", path.display(), e);
            None
        }
    }
}

/// Parse markable file contents. Malformed files count as missing.
pub fn parse_annotation<'input>(text: &'input str, path: &Path) -> Option<Document<'input>> {
    match parse_xml(text) {
        Ok(document) => Some(document),
        Err(e) => {
            debug!("cannot parse {}: {}", path.display(), e);
            None
        }
    }
}
