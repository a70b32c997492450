//! Corpus-level agreement measurement for MMAX annotation projects.
//!
//! This crate reads an MMAX corpus annotated by two annotators (a basedata
//! directory plus one markables directory per annotator), compares every
//! document both annotators marked up, and renders the per-document and
//! pooled kappa statistics.
//!
//! ## Modules
//!
//! - [`loader`] - Corpus directories and markable file discovery
//! - [`document`] - MMAX XML parsing
//! - [`basedata`] - Token tables from `*.words.xml` files
//! - [`runner`] - Runs the comparison over a whole corpus
//! - [`report`] - Text and JSON reports
//! - [`config`] - TOML configuration
//! - [`errors`] - Error types for corpus processing

pub mod basedata;
pub mod config;
pub mod document;
pub mod errors;
pub mod loader;
pub mod report;
pub mod runner;

pub use basedata::{load_basedata, parse_basedata};
pub use config::AgreementConfig;
pub use document::{elements, parse_annotation, parse_xml, read_annotation, XmlElement};
pub use errors::{CorpusError, CorpusResult};
pub use loader::{parse_markable_file_name, CorpusLayout, MarkableFileName};
pub use report::{format_document, format_json, format_report, format_summary};
pub use runner::{process_document, run_corpus, CorpusRun, RunSummary, SkippedDocument};
