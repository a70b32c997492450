//! Token id to text lookup for one base document.

use crate::span::TokenId;
use std::collections::HashMap;

/// Texts of the tokens of one base document.
///
/// Built once per document, in document order. The token count is the number
/// of words the document lists, which is the token universe used for Kappa.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    texts: HashMap<TokenId, String>,
    count: usize,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(id, text)` pairs.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = (TokenId, S)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (id, text) in words {
            table.push(id, text);
        }
        table
    }

    /// Append one word. A repeated id overrides the earlier text but still
    /// counts towards the token universe.
    pub fn push(&mut self, id: TokenId, text: impl Into<String>) {
        self.texts.insert(id, text.into());
        self.count += 1;
    }

    pub fn text(&self, id: TokenId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    /// Size of the base token universe.
    pub fn token_count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_count() {
        let table = TokenTable::from_words([(1, "I"), (2, "like"), (3, "it"), (4, ":)")]);
        assert_eq!(table.token_count(), 4);
        assert_eq!(table.text(4), Some(":)"));
        assert_eq!(table.text(5), None);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_repeated_id_counts_every_word() {
        let mut table = TokenTable::new();
        table.push(1, "a");
        table.push(1, "b");
        assert_eq!(table.token_count(), 2);
        assert_eq!(table.text(1), Some("b"));
    }
}
