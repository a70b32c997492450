//! MMAX span strings.
//!
//! A span names the (possibly discontiguous) tokens a markable covers, e.g.
//! `word_1..word_3,word_7`. Ranges are inclusive.

use crate::errors::{AgreementError, AgreementResult};

/// Integer identifier of one token in a base document.
pub type TokenId = u32;

/// Prefix of token ids in basedata and span strings.
pub const WORD_PREFIX: &str = "word_";

const WORD_SEP: char = ',';
const WORD_RANGE_SEP: &str = "..";

/// Parse a token id such as `word_12` into its integer part.
pub fn parse_token_id(id: &str) -> Option<TokenId> {
    id.trim().strip_prefix(WORD_PREFIX)?.parse().ok()
}

/// Decode a span string into an ascending, deduplicated list of token ids.
///
/// Empty pieces are ignored, so a string made only of separators decodes to
/// an empty list. Deciding whether that is acceptable is left to the caller.
pub fn decode_span(span: &str) -> AgreementResult<Vec<TokenId>> {
    let mut ids = Vec::new();

    for piece in span.split(WORD_SEP).map(str::trim) {
        if piece.is_empty() {
            continue;
        }

        match piece.split_once(WORD_RANGE_SEP) {
            Some((start, end)) => {
                let start = token_id_in(span, start)?;
                let end = token_id_in(span, end)?;
                if end < start {
                    return Err(AgreementError::MalformedSpan {
                        span: span.to_string(),
                        message: format!("range '{}' ends before it starts", piece),
                    });
                }
                ids.extend(start..=end);
            }
            None => ids.push(token_id_in(span, piece)?),
        }
    }

    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

fn token_id_in(span: &str, id: &str) -> AgreementResult<TokenId> {
    parse_token_id(id).ok_or_else(|| AgreementError::MalformedSpan {
        span: span.to_string(),
        message: format!("invalid token reference '{}'", id.trim()),
    })
}

/// Encode a sorted list of token ids as a compact span string.
///
/// Runs of consecutive ids collapse to `word_a..word_b`.
pub fn encode_span(ids: &[TokenId]) -> String {
    let mut pieces = Vec::new();
    let mut iter = ids.iter().copied();

    let Some(first) = iter.next() else {
        return String::new();
    };

    let mut range_start = first;
    let mut prev = first;
    for id in iter {
        if id > prev.saturating_add(1) {
            pieces.push(encode_range(range_start, prev));
            range_start = id;
        }
        prev = id;
    }
    pieces.push(encode_range(range_start, prev));

    pieces.join(",")
}

fn encode_range(start: TokenId, end: TokenId) -> String {
    if start == end {
        format!("{}{}", WORD_PREFIX, start)
    } else {
        format!(
            "{}{}{}{}{}",
            WORD_PREFIX, start, WORD_RANGE_SEP, WORD_PREFIX, end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_id() {
        assert_eq!(parse_token_id("word_12"), Some(12));
        assert_eq!(parse_token_id(" word_0 "), Some(0));
        assert_eq!(parse_token_id("markable_12"), None);
        assert_eq!(parse_token_id("word_"), None);
        assert_eq!(parse_token_id("word_x"), None);
    }

    #[test]
    fn test_decode_single_and_range() {
        assert_eq!(decode_span("word_4").unwrap(), vec![4]);
        assert_eq!(decode_span("word_1..word_3").unwrap(), vec![1, 2, 3]);
        assert_eq!(
            decode_span("word_1..word_3,word_7").unwrap(),
            vec![1, 2, 3, 7]
        );
    }

    #[test]
    fn test_decode_sorts_and_dedups() {
        assert_eq!(
            decode_span("word_9,word_2..word_4,word_3").unwrap(),
            vec![2, 3, 4, 9]
        );
    }

    #[test]
    fn test_decode_ignores_empty_pieces() {
        assert_eq!(decode_span("word_5, ,").unwrap(), vec![5]);
        assert!(decode_span(",").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(
            decode_span("word_1,token_2"),
            Err(AgreementError::MalformedSpan { .. })
        ));
        assert!(matches!(
            decode_span("word_5..word_2"),
            Err(AgreementError::MalformedSpan { .. })
        ));
        assert!(matches!(
            decode_span("word_1..word_2..word_3"),
            Err(AgreementError::MalformedSpan { .. })
        ));
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode_span(&[]), "");
        assert_eq!(encode_span(&[4]), "word_4");
        assert_eq!(encode_span(&[1, 2, 3]), "word_1..word_3");
        assert_eq!(
            encode_span(&[1, 2, 3, 7, 9, 10]),
            "word_1..word_3,word_7,word_9..word_10"
        );
    }

    #[test]
    fn test_encode_reverses_decode() {
        let span = "word_1..word_3,word_7,word_9..word_12";
        assert_eq!(encode_span(&decode_span(span).unwrap()), span);
    }
}
