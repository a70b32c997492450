//! Basedata (`*.words.xml`) loading.
//!
//! A basedata file lists the tokens of one document as `<word>` children of
//! the root element, each with an `id` such as `word_12`.

use crate::document::parse_xml;
use crate::errors::{CorpusError, CorpusResult};
use mmax_agreement::{parse_token_id, TokenTable};
use std::fs;
use std::path::Path;

const WORD_TAG: &str = "word";

/// Load the token table of one document.
pub fn load_basedata(path: &Path) -> CorpusResult<TokenTable> {
    let text = fs::read_to_string(path).map_err(|e| CorpusError::Basedata {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_basedata(&text).map_err(|message| CorpusError::Basedata {
        path: path.display().to_string(),
        message,
    })
}

/// Build a token table from basedata XML.
pub fn parse_basedata(text: &str) -> Result<TokenTable, String> {
    let document = parse_xml(text).map_err(|e| e.to_string())?;

    let mut table = TokenTable::new();
    for word in document
        .root_element()
        .children()
        .filter(|node| node.has_tag_name(WORD_TAG))
    {
        let id = word
            .attribute("id")
            .ok_or_else(|| "word element without id".to_string())?;
        let token = parse_token_id(id).ok_or_else(|| format!("invalid word id '{}'", id))?;
        table.push(token, word.text().unwrap_or(""));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const WORDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE words SYSTEM "words.dtd">
<words>
<word id="word_1">Endlich</word>
<word id="word_2">Wochenende</word>
<word id="word_3">:-)</word>
<word id="word_4"></word>
</words>
"#;

    #[test]
    fn test_parse_basedata() {
        let table = parse_basedata(WORDS).unwrap();
        assert_eq!(table.token_count(), 4);
        assert_eq!(table.text(1), Some("Endlich"));
        assert_eq!(table.text(3), Some(":-)"));
        assert_eq!(table.text(4), Some(""));
    }

    #[test]
    fn test_invalid_word_id() {
        let err = parse_basedata(r#"<words><word id="w1">x</word></words>"#).unwrap_err();
        assert!(err.contains("w1"));
        assert!(parse_basedata("<words><word>x</word></words>").is_err());
    }

    #[test]
    fn test_load_basedata() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", WORDS).unwrap();
        assert_eq!(load_basedata(file.path()).unwrap().token_count(), 4);

        let err = load_basedata(Path::new("/nonexistent/doc.words.xml")).unwrap_err();
        assert!(err.is_document_level());
    }
}
