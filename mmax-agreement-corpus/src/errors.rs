//! Error types for corpus processing.

use mmax_agreement::AgreementError;
use thiserror::Error;

/// Errors that can occur while loading and measuring a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A directory or file could not be read.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// A basedata file could not be read or does not list valid words.
    #[error("invalid basedata {path}: {message}")]
    Basedata { path: String, message: String },

    /// The configuration file is unreadable or invalid.
    #[error("configuration error in {path}: {message}")]
    Config { path: String, message: String },

    /// Extraction, comparison or scoring failed.
    #[error(transparent)]
    Agreement(#[from] AgreementError),
}

impl CorpusError {
    /// Whether the error only affects the document being processed.
    pub fn is_document_level(&self) -> bool {
        match self {
            CorpusError::Basedata { .. } => true,
            CorpusError::Agreement(err) => err.is_document_level(),
            CorpusError::Load { .. } | CorpusError::Config { .. } => false,
        }
    }
}

/// Result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
