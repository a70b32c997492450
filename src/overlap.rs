//! Span matching under the three overlap disciplines.
//!
//! All functions take the markables of one document, one category and one
//! polarity for each annotator, sorted by `(first token, last token)`.

use crate::markable::Markable;
use crate::span::TokenId;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// How two annotators' spans are matched against each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    /// A markable agrees on all its tokens if it shares at least one token
    /// with the other annotator.
    #[default]
    Binary,
    /// Only tokens marked by both annotators agree.
    Proportional,
    /// Markables agree only when their token sequences are identical.
    #[serde(alias = "exact-match")]
    Exact,
}

impl ComparisonMode {
    /// Whether the two annotators may end up with different match counts.
    pub fn allows_unequal_matches(self) -> bool {
        matches!(self, ComparisonMode::Binary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonMode::Binary => "binary",
            ComparisonMode::Proportional => "proportional",
            ComparisonMode::Exact => "exact",
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "binary-overlap" => Ok(ComparisonMode::Binary),
            "proportional" | "proportional-overlap" => Ok(ComparisonMode::Proportional),
            "exact" | "exact-match" => Ok(ComparisonMode::Exact),
            other => Err(format!(
                "unknown comparison mode '{}' (expected binary, proportional or exact)",
                other
            )),
        }
    }
}

/// Matched and total units (tokens or markables) of one annotator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapCounters {
    pub matched: usize,
    pub total: usize,
}

impl OverlapCounters {
    pub fn new(matched: usize, total: usize) -> Self {
        Self { matched, total }
    }
}

impl AddAssign for OverlapCounters {
    fn add_assign(&mut self, other: Self) {
        self.matched += other.matched;
        self.total += other.total;
    }
}

/// Outcome of comparing the two annotators for one polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolarityComparison {
    pub first: OverlapCounters,
    pub second: OverlapCounters,
    /// Exact-match only: tokens covered by either annotator, and the longer
    /// of the two markable lists.
    pub universe_correction: Option<(usize, usize)>,
}

impl PolarityComparison {
    /// Apply the exact-match correction to a token universe size: covered
    /// tokens are replaced by markable slots.
    pub fn corrected_universe(&self, token_count: usize) -> usize {
        match self.universe_correction {
            Some((covered, markables)) => token_count.saturating_sub(covered) + markables,
            None => token_count,
        }
    }
}

/// Compare two markable lists under `mode`.
pub fn compare_lists<M: Borrow<Markable>>(
    mode: ComparisonMode,
    first: &[M],
    second: &[M],
) -> PolarityComparison {
    match mode {
        ComparisonMode::Binary => {
            let (first, second) = compare_binary(first, second);
            PolarityComparison {
                first,
                second,
                universe_correction: None,
            }
        }
        ComparisonMode::Proportional => {
            let (first, second) = compare_proportional(first, second);
            PolarityComparison {
                first,
                second,
                universe_correction: None,
            }
        }
        ComparisonMode::Exact => {
            let matched = align_exact(first, second);
            let covered = token_set(first).union(&token_set(second)).count();
            PolarityComparison {
                first: OverlapCounters::new(matched, first.len()),
                second: OverlapCounters::new(matched, second.len()),
                universe_correction: Some((covered, first.len().max(second.len()))),
            }
        }
    }
}

fn token_set<M: Borrow<Markable>>(markables: &[M]) -> HashSet<TokenId> {
    markables
        .iter()
        .flat_map(|m| m.borrow().tokens().iter().copied())
        .collect()
}

/// Binary overlap.
///
/// Each annotator's total is the raw token count over all its markables. A
/// markable that touches any token of the other annotator contributes all
/// of its tokens to the match counter.
pub fn compare_binary<M: Borrow<Markable>>(
    first: &[M],
    second: &[M],
) -> (OverlapCounters, OverlapCounters) {
    let first_set = token_set(first);
    let second_set = token_set(second);
    (
        binary_counters(first, &second_set),
        binary_counters(second, &first_set),
    )
}

fn binary_counters<M: Borrow<Markable>>(
    markables: &[M],
    other: &HashSet<TokenId>,
) -> OverlapCounters {
    let mut counters = OverlapCounters::default();
    for markable in markables {
        let tokens = markable.borrow().tokens();
        counters.total += tokens.len();
        if tokens.iter().any(|t| other.contains(t)) {
            counters.matched += tokens.len();
        }
    }
    counters
}

/// Proportional overlap over deduplicated token sets. The match count is
/// the intersection size and is the same for both annotators.
pub fn compare_proportional<M: Borrow<Markable>>(
    first: &[M],
    second: &[M],
) -> (OverlapCounters, OverlapCounters) {
    let first_set = token_set(first);
    let second_set = token_set(second);
    let shared = first_set.intersection(&second_set).count();
    (
        OverlapCounters::new(shared, first_set.len()),
        OverlapCounters::new(shared, second_set.len()),
    )
}

/// Count markables with identical token sequences in two sorted lists.
///
/// Walks both lists like a merge: the markable that starts earlier is passed
/// over. When both start on the same token, both are consumed and a match is
/// counted only if the token sequences are equal, so a shorter markable
/// sharing its start with a longer one is never paired with a later one.
pub fn align_exact<M: Borrow<Markable>>(first: &[M], second: &[M]) -> usize {
    let (mut i, mut j) = (0, 0);
    let mut matched = 0;

    while i < first.len() && j < second.len() {
        let (a, b) = (first[i].borrow(), second[j].borrow());
        match a.first_token().cmp(&b.first_token()) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                if a.tokens() == b.tokens() {
                    matched += 1;
                }
                i += 1;
                j += 1;
            }
        }
    }

    matched
}
