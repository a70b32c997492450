//! Per-document comparison of two annotation sets.

use crate::emoticon::is_emoticon_only;
use crate::errors::AgreementResult;
use crate::markable::{extract_markables, AnnotatedElement, Markable, Polarity};
use crate::overlap::{compare_lists, ComparisonMode};
use crate::stats::CategoryCounters;
use crate::tokens::TokenTable;
use tracing::debug;

/// Counters of both annotators for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentComparison {
    pub first: CategoryCounters,
    pub second: CategoryCounters,
    /// Token universe for this document. Exact-match comparison replaces
    /// covered tokens by markable slots, so this can differ from the size of
    /// the base document.
    pub token_count: usize,
}

/// Compare the markables of two parsed annotation documents.
///
/// A missing document contributes no markables.
pub fn compare<A, B>(
    first: Option<A>,
    second: Option<B>,
    texts: &TokenTable,
    level: &str,
    mode: ComparisonMode,
) -> AgreementResult<DocumentComparison>
where
    A: IntoIterator,
    A::Item: AnnotatedElement,
    B: IntoIterator,
    B::Item: AnnotatedElement,
{
    let first = extract_markables(first)?;
    let second = extract_markables(second)?;
    compare_markables(&first, &second, texts, level, mode)
}

/// Compare two sorted markable lists, one polarity at a time.
pub fn compare_markables(
    first: &[Markable],
    second: &[Markable],
    texts: &TokenTable,
    level: &str,
    mode: ComparisonMode,
) -> AgreementResult<DocumentComparison> {
    let mut result = DocumentComparison {
        token_count: texts.token_count(),
        ..DocumentComparison::default()
    };

    for polarity in Polarity::ALL {
        let first_part = select(first, polarity, level, texts)?;
        let second_part = select(second, polarity, level, texts)?;

        let comparison = compare_lists(mode, &first_part, &second_part);
        let category = polarity.category(level);
        result.first.insert(category.clone(), comparison.first);
        result.second.insert(category, comparison.second);

        let corrected = comparison.corrected_universe(result.token_count);
        if corrected != result.token_count {
            debug!(
                "{} markables: token universe corrected from {} to {}",
                polarity, result.token_count, corrected
            );
        }
        result.token_count = corrected;
    }

    Ok(result)
}

/// Markables of `level` with the given polarity that are not emoticon-only,
/// in their original order.
fn select<'a>(
    markables: &'a [Markable],
    polarity: Polarity,
    level: &str,
    texts: &TokenTable,
) -> AgreementResult<Vec<&'a Markable>> {
    let mut selected = Vec::new();
    for markable in markables.iter().filter(|m| m.belongs_to_level(level)) {
        if markable.polarity()? != Some(polarity) {
            continue;
        }
        if is_emoticon_only(markable, texts)? {
            debug!("skipping emoticon-only markable {}", markable);
            continue;
        }
        selected.push(markable);
    }
    Ok(selected)
}
