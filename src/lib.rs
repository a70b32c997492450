//! Inter-annotator agreement over span-based MMAX annotations.
//!
//! Two annotators place markables on the same token sequence. This crate
//! turns both annotation sets into comparable markable lists, matches them
//! under one of three overlap disciplines, and computes Cohen's Kappa per
//! category and pooled over a corpus.
//!
//! ## Modules
//!
//! - [`span`] - Encoding and decoding of `word_1..word_3,word_7` span strings
//! - [`tokens`] - Token id to text lookup for one base document
//! - [`markable`] - Markable records and extraction from annotated elements
//! - [`emoticon`] - Emoticon-only markable detection
//! - [`overlap`] - Binary, proportional and exact-match comparison
//! - [`kappa`] - Cohen's Kappa from match/total counters
//! - [`compare`] - Per-document comparison of two annotation sets
//! - [`stats`] - Per-document statistics and corpus pooling
//! - [`errors`] - Error types for the agreement engine
//!
//! ## Example
//!
//! ```
//! use mmax_agreement::{kappa, ComparisonMode};
//!
//! let k = kappa(2, 3, 2, 3, 10, ComparisonMode::Proportional).unwrap();
//! assert!((k - 0.5238).abs() < 1e-4);
//! ```

pub mod compare;
pub mod emoticon;
pub mod errors;
pub mod kappa;
pub mod markable;
pub mod overlap;
pub mod span;
pub mod stats;
pub mod tokens;

pub use compare::{compare, compare_markables, DocumentComparison};
pub use emoticon::{is_emoticon_only, is_smiley};
pub use errors::{AgreementError, AgreementResult};
pub use kappa::kappa;
pub use markable::{extract_markables, AnnotatedElement, Markable, Polarity};
pub use overlap::{
    align_exact, compare_binary, compare_lists, compare_proportional, ComparisonMode, OverlapCounters,
    PolarityComparison,
};
pub use span::{decode_span, encode_span, parse_token_id, TokenId, WORD_PREFIX};
pub use stats::{
    pool, AgreementReport, CategoryCounters, CategoryKappa, CorpusStatistics, DocumentKappa,
    DocumentStatistics, PooledCounters, StatisticsAggregator, OVERALL,
};
pub use tokens::TokenTable;
