//! Corpus runner: compares every document annotated by both annotators.

use crate::basedata::load_basedata;
use crate::config::AgreementConfig;
use crate::document::{elements, parse_annotation, read_annotation};
use crate::errors::CorpusResult;
use crate::loader::{parse_markable_file_name, CorpusLayout};
use mmax_agreement::{compare, AgreementError, DocumentStatistics, StatisticsAggregator};
use std::path::Path;
use tracing::{debug, info, warn};

/// A document left out of the statistics, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub document: String,
    pub reason: String,
}

/// Bookkeeping of one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Documents whose statistics were recorded.
    pub processed: usize,
    /// Documents skipped because of document-level errors.
    pub skipped: Vec<SkippedDocument>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn record_skipped(&mut self, document: impl Into<String>, reason: impl ToString) {
        self.skipped.push(SkippedDocument {
            document: document.into(),
            reason: reason.to_string(),
        });
    }

    /// Documents considered, recorded or not.
    pub fn total(&self) -> usize {
        self.processed + self.skipped.len()
    }
}

/// Statistics gathered over a corpus.
#[derive(Debug, Default)]
pub struct CorpusRun {
    pub statistics: StatisticsAggregator,
    pub summary: RunSummary,
}

/// Compare every markable file of the first annotator with its counterpart.
///
/// Documents are processed one at a time in path order. Document-level
/// errors are logged and the document is skipped; any other error ends the
/// run.
pub fn run_corpus(layout: &CorpusLayout, config: &AgreementConfig) -> CorpusResult<CorpusRun> {
    layout.validate()?;

    let mut run = CorpusRun::default();
    for path in layout.markable_files(&config.pattern)? {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!("skipping file with a non UTF-8 name: {}", path.display());
            continue;
        };
        let Some(name) = parse_markable_file_name(file_name) else {
            debug!("'{}' is not named like a markable file", file_name);
            continue;
        };
        if name.level != config.level.to_lowercase() {
            debug!("'{}' holds level '{}'", file_name, name.level);
            continue;
        }

        info!("Processing file '{}'", path.display());
        match process_document(layout, config, &path, file_name, &name.document) {
            Ok(statistics) => {
                run.statistics.record(statistics);
                run.summary.record_processed();
            }
            Err(err) if err.is_document_level() => {
                warn!("skipping '{}': {}", name.document, err);
                run.summary.record_skipped(name.document, err);
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        "{} of {} documents compared",
        run.summary.processed,
        run.summary.total()
    );
    Ok(run)
}

/// Compare the two annotations of one document.
pub fn process_document(
    layout: &CorpusLayout,
    config: &AgreementConfig,
    first_path: &Path,
    file_name: &str,
    document: &str,
) -> CorpusResult<DocumentStatistics> {
    let second_path = layout.counterpart(file_name);

    let first_text = read_annotation(first_path);
    let second_text = read_annotation(&second_path);
    let first = first_text
        .as_deref()
        .and_then(|text| parse_annotation(text, first_path));
    let second = second_text
        .as_deref()
        .and_then(|text| parse_annotation(text, &second_path));

    let (first, second) = match (first, second) {
        (Some(first), Some(second)) => (first, second),
        (first, _) => {
            let missing = if first.is_none() { first_path } else { second_path.as_path() };
            return Err(AgreementError::MissingDocument {
                key: document.to_string(),
                reason: format!("{} is absent or not well-formed", missing.display()),
            }
            .into());
        }
    };

    let texts = load_basedata(&layout.basedata_path(document, &config.basedata_suffix))?;
    let comparison = compare(
        Some(elements(&first)),
        Some(elements(&second)),
        &texts,
        &config.level,
        config.mode,
    )?;

    Ok(DocumentStatistics::new(document, comparison))
}
