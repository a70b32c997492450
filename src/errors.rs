//! Error types for the agreement engine.
//!
//! Errors fall into two groups. Document-level errors make one document
//! unusable and are reported and skipped by the caller. The remaining errors
//! mean the computed numbers cannot be trusted and must end the run.

use crate::span::TokenId;
use thiserror::Error;

/// Errors that can occur while extracting, comparing or scoring markables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgreementError {
    /// One or both annotator documents are absent or could not be parsed.
    #[error("missing annotation document for '{key}': {reason}")]
    MissingDocument { key: String, reason: String },

    /// A span attribute could not be decoded, or decoded to no tokens.
    #[error("malformed span '{span}': {message}")]
    MalformedSpan { span: String, message: String },

    /// A markable lacks an attribute required for comparison.
    #[error("markable {markable} has no '{attribute}' attribute")]
    MissingAttribute { markable: String, attribute: String },

    /// A markable covers a token that is not part of the base document.
    #[error("token {token} is not present in the base document")]
    UnknownToken { token: TokenId },

    /// Counters or probabilities broke an invariant of the kappa computation.
    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },

    /// The two annotators expose different category sets for a document.
    #[error("unmatched categories for two annotators in '{document}': {first:?} vs. {second:?}")]
    CategoryMismatch {
        document: String,
        first: Vec<String>,
        second: Vec<String>,
    },
}

impl AgreementError {
    /// Whether the error only invalidates the current document.
    pub fn is_document_level(&self) -> bool {
        matches!(
            self,
            AgreementError::MissingDocument { .. }
                | AgreementError::MalformedSpan { .. }
                | AgreementError::MissingAttribute { .. }
                | AgreementError::UnknownToken { .. }
        )
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        AgreementError::InvariantViolation {
            message: message.into(),
        }
    }
}

/// Result type for agreement operations.
pub type AgreementResult<T> = Result<T, AgreementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_level_classification() {
        let recoverable = AgreementError::MalformedSpan {
            span: ",".to_string(),
            message: "span decodes to no tokens".to_string(),
        };
        assert!(recoverable.is_document_level());
        assert!(AgreementError::UnknownToken { token: 7 }.is_document_level());

        let fatal = AgreementError::invariant("overlap exceeds total");
        assert!(!fatal.is_document_level());

        let mismatch = AgreementError::CategoryMismatch {
            document: "doc".to_string(),
            first: vec!["a".to_string()],
            second: vec![],
        };
        assert!(!mismatch.is_document_level());
    }

    #[test]
    fn test_error_messages() {
        let err = AgreementError::MissingAttribute {
            markable: "emo-expression[word_1..word_2]".to_string(),
            attribute: "polarity".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "markable emo-expression[word_1..word_2] has no 'polarity' attribute"
        );
    }

    #[test]
    fn test_category_mismatch_message() {
        let err = AgreementError::CategoryMismatch {
            document: "tweet_1".to_string(),
            first: vec!["emo-expression-neg".to_string(), "emo-expression-pos".to_string()],
            second: vec!["emo-expression-pos".to_string()],
        };
        insta::assert_snapshot!(err.to_string(), @r#"unmatched categories for two annotators in 'tweet_1': ["emo-expression-neg", "emo-expression-pos"] vs. ["emo-expression-pos"]"#);
    }
}
