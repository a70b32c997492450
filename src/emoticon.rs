//! Emoticon-only markable detection.
//!
//! Annotators sometimes mark bare smileys or laughter as emotional
//! expressions. Markables made only of such tokens are left out of the
//! comparison.

use crate::errors::{AgreementError, AgreementResult};
use crate::markable::Markable;
use crate::tokens::TokenTable;
use once_cell::sync::Lazy;
use regex::Regex;

const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

static SMILEY_RE: Lazy<Regex> = Lazy::new(|| {
    let punctuation = PUNCTUATION
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^(?:ha|d|x|lol|{})+$", punctuation))
        .expect("smiley pattern is valid")
});

/// Whether a single token looks like a smiley or laughter.
pub fn is_smiley(word: &str) -> bool {
    SMILEY_RE.is_match(word)
}

/// Whether every token of `markable` is a smiley.
///
/// Every token must be present in `texts`; a missing token is an error even
/// when an earlier token already disqualified the markable.
pub fn is_emoticon_only(markable: &Markable, texts: &TokenTable) -> AgreementResult<bool> {
    let mut all_smileys = true;
    for &token in markable.tokens() {
        let text = texts
            .text(token)
            .ok_or(AgreementError::UnknownToken { token })?;
        all_smileys &= is_smiley(text);
    }
    Ok(all_smileys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markable::tests::emo;

    #[test]
    fn test_is_smiley() {
        for word in [":)", ":-(", ";D", "xD", "XD", "haha", "HaHa", "lol", "LOL", "!!!", "^^"] {
            assert!(is_smiley(word), "{} should be a smiley", word);
        }
        for word in ["", "good", "hah", ":-p", "love", "happy!"] {
            assert!(!is_smiley(word), "{} should not be a smiley", word);
        }
    }

    #[test]
    fn test_emoticon_only_markable() {
        let texts = TokenTable::from_words([(1, "so"), (2, "good"), (3, ":)"), (4, "xD")]);

        assert!(is_emoticon_only(&emo(&[3], "positive"), &texts).unwrap());
        assert!(is_emoticon_only(&emo(&[3, 4], "positive"), &texts).unwrap());
        assert!(!is_emoticon_only(&emo(&[2, 3], "positive"), &texts).unwrap());
        assert!(!is_emoticon_only(&emo(&[1, 2], "negative"), &texts).unwrap());
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let texts = TokenTable::from_words([(1, "nice")]);
        assert_eq!(
            is_emoticon_only(&emo(&[1, 7], "positive"), &texts),
            Err(AgreementError::UnknownToken { token: 7 })
        );
    }
}
