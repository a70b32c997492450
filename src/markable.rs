//! Markables and their extraction from annotation documents.
//!
//! MMAX markable files are namespaced per level, so element names cannot be
//! relied on to find markables. Any element that carries a non-empty `span`
//! attribute is treated as one.

use crate::errors::{AgreementError, AgreementResult};
use crate::span::{decode_span, encode_span, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute holding the span string.
pub const SPAN_ATTRIBUTE: &str = "span";
/// Attribute holding the annotation level name.
pub const LEVEL_ATTRIBUTE: &str = "mmax_level";
/// Attribute partitioning emotional expressions.
pub const POLARITY_ATTRIBUTE: &str = "polarity";

/// An element of a parsed annotation document that may carry attributes.
pub trait AnnotatedElement {
    /// Value of the attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// All attributes of the element.
    fn attributes(&self) -> BTreeMap<String, String>;
}

impl<T: AnnotatedElement + ?Sized> AnnotatedElement for &T {
    fn attribute(&self, name: &str) -> Option<&str> {
        (**self).attribute(name)
    }

    fn attributes(&self) -> BTreeMap<String, String> {
        (**self).attributes()
    }
}

/// Polarity of an emotional expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub const ALL: [Polarity; 2] = [Polarity::Positive, Polarity::Negative];

    /// Parse an attribute value. Only the exact values `positive` and
    /// `negative` are recognized.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "positive" => Some(Polarity::Positive),
            "negative" => Some(Polarity::Negative),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }

    /// Statistics category for this polarity on `level`, e.g.
    /// `emo-expression-pos`.
    pub fn category(self, level: &str) -> String {
        let suffix = match self {
            Polarity::Positive => "pos",
            Polarity::Negative => "neg",
        };
        format!("{}-{}", level, suffix)
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One annotation instance: a labeled, possibly discontiguous token span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Markable {
    tokens: Vec<TokenId>,
    category: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl Markable {
    /// Create a markable. Tokens are sorted and deduplicated; an empty token
    /// list is rejected.
    pub fn new(
        mut tokens: Vec<TokenId>,
        category: Option<String>,
        attributes: BTreeMap<String, String>,
    ) -> AgreementResult<Self> {
        tokens.sort_unstable();
        tokens.dedup();
        if tokens.is_empty() {
            return Err(AgreementError::MalformedSpan {
                span: String::new(),
                message: "markable covers no tokens".to_string(),
            });
        }
        Ok(Self {
            tokens,
            category,
            attributes,
        })
    }

    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn first_token(&self) -> TokenId {
        self.tokens[0]
    }

    pub fn last_token(&self) -> TokenId {
        self.tokens[self.tokens.len() - 1]
    }

    /// Ordering key of markable lists: `(first token, last token)`.
    pub fn sort_key(&self) -> (TokenId, TokenId) {
        (self.first_token(), self.last_token())
    }

    /// Compact span string for this markable.
    pub fn span(&self) -> String {
        encode_span(&self.tokens)
    }

    /// Whether this markable takes part in comparisons for `level`.
    /// Markables without a level attribute belong to every level.
    pub fn belongs_to_level(&self, level: &str) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| category.eq_ignore_ascii_case(level))
    }

    /// Polarity of the markable.
    ///
    /// Fails when the attribute is missing; an unrecognized value yields
    /// `None` so the markable falls in neither partition.
    pub fn polarity(&self) -> AgreementResult<Option<Polarity>> {
        self.attribute(POLARITY_ATTRIBUTE)
            .map(Polarity::from_attribute)
            .ok_or_else(|| AgreementError::MissingAttribute {
                markable: self.to_string(),
                attribute: POLARITY_ATTRIBUTE.to_string(),
            })
    }
}

impl fmt::Display for Markable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.category.as_deref().unwrap_or("markable"),
            self.span()
        )
    }
}

/// Extract markables from the elements of one annotation document, in
/// document order, and sort them by `(first token, last token)`.
///
/// An absent document yields an empty list.
pub fn extract_markables<I>(document: Option<I>) -> AgreementResult<Vec<Markable>>
where
    I: IntoIterator,
    I::Item: AnnotatedElement,
{
    let Some(elements) = document else {
        return Ok(Vec::new());
    };

    let mut markables = Vec::new();
    for element in elements {
        let span = match element.attribute(SPAN_ATTRIBUTE) {
            Some(span) if !span.is_empty() => span,
            _ => continue,
        };

        let tokens = decode_span(span)?;
        if tokens.is_empty() {
            return Err(AgreementError::MalformedSpan {
                span: span.to_string(),
                message: "span decodes to no tokens".to_string(),
            });
        }

        markables.push(Markable {
            tokens,
            category: element.attribute(LEVEL_ATTRIBUTE).map(str::to_string),
            attributes: element.attributes(),
        });
    }

    markables.sort_by_key(Markable::sort_key);
    Ok(markables)
}
