//! Per-document statistics and corpus-wide pooling.
//!
//! Corpus figures are computed from counters summed over all documents.
//! Kappa is not linear in its inputs, so averaging per-document values would
//! give a different (and statistically meaningless) number.

use crate::compare::DocumentComparison;
use crate::errors::{AgreementError, AgreementResult};
use crate::kappa::kappa;
use crate::overlap::{ComparisonMode, OverlapCounters};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Overlap counters of one annotator, keyed by category name.
pub type CategoryCounters = BTreeMap<String, OverlapCounters>;

/// Label of the row that pools all categories together.
pub const OVERALL: &str = "overall";

/// Counters of one document for both annotators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStatistics {
    /// Document identity, e.g. the base name shared by the annotation files.
    pub key: String,
    pub token_count: usize,
    pub annotators: [CategoryCounters; 2],
}

impl DocumentStatistics {
    pub fn new(key: impl Into<String>, comparison: DocumentComparison) -> Self {
        Self {
            key: key.into(),
            token_count: comparison.token_count,
            annotators: [comparison.first, comparison.second],
        }
    }

    /// Fail unless both annotators report the same categories.
    pub fn check_categories(&self) -> AgreementResult<()> {
        let [first, second] = &self.annotators;
        if first.keys().eq(second.keys()) {
            return Ok(());
        }
        Err(AgreementError::CategoryMismatch {
            document: self.key.clone(),
            first: first.keys().cloned().collect(),
            second: second.keys().cloned().collect(),
        })
    }

    /// Counters of both annotators per category.
    pub fn pooled_counters(&self) -> AgreementResult<BTreeMap<String, PooledCounters>> {
        self.check_categories()?;
        let [first, second] = &self.annotators;
        Ok(first
            .iter()
            .map(|(category, &counters)| {
                let pair = PooledCounters {
                    first: counters,
                    second: second[category],
                };
                (category.clone(), pair)
            })
            .collect())
    }

    /// Kappa per category for this document alone.
    pub fn kappas(&self, mode: ComparisonMode) -> AgreementResult<DocumentKappa> {
        let categories = self
            .pooled_counters()?
            .into_iter()
            .map(|(category, counters)| counters.score(category, self.token_count, mode))
            .collect::<AgreementResult<Vec<_>>>()?;
        Ok(DocumentKappa {
            key: self.key.clone(),
            token_count: self.token_count,
            categories,
        })
    }
}

/// Counters of the first and second annotator for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PooledCounters {
    pub first: OverlapCounters,
    pub second: OverlapCounters,
}

impl PooledCounters {
    pub fn kappa(&self, token_count: usize, mode: ComparisonMode) -> AgreementResult<f64> {
        kappa(
            self.first.matched,
            self.first.total,
            self.second.matched,
            self.second.total,
            token_count,
            mode,
        )
    }

    fn score(
        self,
        category: String,
        token_count: usize,
        mode: ComparisonMode,
    ) -> AgreementResult<CategoryKappa> {
        Ok(CategoryKappa {
            kappa: self.kappa(token_count, mode)?,
            category,
            first: self.first,
            second: self.second,
        })
    }
}

impl AddAssign for PooledCounters {
    fn add_assign(&mut self, other: Self) {
        self.first += other.first;
        self.second += other.second;
    }
}

/// Counters summed over a whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusStatistics {
    /// Sum of the token universes of all documents.
    pub token_count: usize,
    pub categories: BTreeMap<String, PooledCounters>,
}

impl CorpusStatistics {
    /// All categories summed into one pair of counters.
    pub fn overall(&self) -> PooledCounters {
        let mut total = PooledCounters::default();
        for &counters in self.categories.values() {
            total += counters;
        }
        total
    }

    pub fn category_kappas(&self, mode: ComparisonMode) -> AgreementResult<Vec<CategoryKappa>> {
        self.categories
            .iter()
            .map(|(category, &counters)| counters.score(category.clone(), self.token_count, mode))
            .collect()
    }

    /// Universe of the overall row: every category labels each token once,
    /// so summed counters are scored against one copy of the tokens per
    /// category.
    pub fn overall_token_count(&self) -> usize {
        self.token_count * self.categories.len()
    }

    pub fn overall_kappa(&self, mode: ComparisonMode) -> AgreementResult<CategoryKappa> {
        self.overall()
            .score(OVERALL.to_string(), self.overall_token_count(), mode)
    }
}

/// Sum document counters per category.
///
/// Fails when a document's annotators expose different category sets.
pub fn pool(documents: &[DocumentStatistics]) -> AgreementResult<CorpusStatistics> {
    let mut corpus = CorpusStatistics::default();
    for document in documents {
        corpus.token_count += document.token_count;
        for (category, counters) in document.pooled_counters()? {
            *corpus.categories.entry(category).or_default() += counters;
        }
    }
    Ok(corpus)
}

/// Kappa of one category, with the counters it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryKappa {
    pub category: String,
    pub first: OverlapCounters,
    pub second: OverlapCounters,
    pub kappa: f64,
}

/// Per-category kappas of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentKappa {
    pub key: String,
    pub token_count: usize,
    pub categories: Vec<CategoryKappa>,
}

/// Everything a report needs: per-document figures and pooled figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementReport {
    pub mode: ComparisonMode,
    pub documents: Vec<DocumentKappa>,
    pub token_count: usize,
    pub categories: Vec<CategoryKappa>,
    pub overall: CategoryKappa,
}

/// Collects document statistics in processing order.
#[derive(Debug, Clone, Default)]
pub struct StatisticsAggregator {
    documents: Vec<DocumentStatistics>,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, document: DocumentStatistics) {
        self.documents.push(document);
    }

    /// Append the documents of another aggregator.
    pub fn merge(mut self, other: StatisticsAggregator) -> Self {
        self.documents.extend(other.documents);
        self
    }

    pub fn documents(&self) -> &[DocumentStatistics] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn pool(&self) -> AgreementResult<CorpusStatistics> {
        pool(&self.documents)
    }

    /// Kappas of every document on its own, for inspection.
    pub fn document_kappas(&self, mode: ComparisonMode) -> AgreementResult<Vec<DocumentKappa>> {
        self.documents.iter().map(|d| d.kappas(mode)).collect()
    }

    /// Run both reporting passes.
    pub fn report(&self, mode: ComparisonMode) -> AgreementResult<AgreementReport> {
        let documents = self.document_kappas(mode)?;
        let corpus = self.pool()?;
        Ok(AgreementReport {
            mode,
            documents,
            token_count: corpus.token_count,
            categories: corpus.category_kappas(mode)?,
            overall: corpus.overall_kappa(mode)?,
        })
    }
}

impl Extend<DocumentStatistics> for StatisticsAggregator {
    fn extend<T: IntoIterator<Item = DocumentStatistics>>(&mut self, iter: T) {
        self.documents.extend(iter);
    }
}
