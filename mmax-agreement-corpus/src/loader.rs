//! Corpus layout and markable file discovery.
//!
//! An MMAX corpus annotated twice has one basedata directory and one
//! markables directory per annotator. Markable files are named
//! `<document>_<level>_level.xml` and the same name is used by both
//! annotators.

use crate::errors::{CorpusError, CorpusResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static MARKABLE_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*)_([^_]+)_level\.xml$").expect("Invalid markable file regex"));

/// Document and level encoded in a markable file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkableFileName {
    /// Base name shared with the basedata file.
    pub document: String,
    /// Markable level, lower-cased.
    pub level: String,
}

/// Split `<document>_<level>_level.xml` into its parts.
pub fn parse_markable_file_name(file_name: &str) -> Option<MarkableFileName> {
    let captures = MARKABLE_FILE_RE.captures(file_name)?;
    Some(MarkableFileName {
        document: captures[1].to_string(),
        level: captures[2].to_lowercase(),
    })
}

/// Directories of a doubly annotated corpus.
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    pub basedata_dir: PathBuf,
    pub first_dir: PathBuf,
    pub second_dir: PathBuf,
}

impl CorpusLayout {
    pub fn new(
        basedata_dir: impl Into<PathBuf>,
        first_dir: impl Into<PathBuf>,
        second_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            basedata_dir: basedata_dir.into(),
            first_dir: first_dir.into(),
            second_dir: second_dir.into(),
        }
    }

    /// Fail unless both annotator directories exist.
    pub fn validate(&self) -> CorpusResult<()> {
        for dir in [&self.first_dir, &self.second_dir] {
            if !dir.is_dir() {
                return Err(CorpusError::Load {
                    path: dir.display().to_string(),
                    message: "directory does not exist or cannot be accessed".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Markable files of the first annotator matching `pattern`, sorted by
    /// path. An empty pattern selects every file.
    pub fn markable_files(&self, pattern: &str) -> CorpusResult<Vec<PathBuf>> {
        let mut files = if pattern.is_empty() {
            list_dir(&self.first_dir)?
        } else {
            glob_dir(&self.first_dir, pattern)?
        };
        files.retain(|path| path.is_file());
        files.sort();
        Ok(files)
    }

    /// The second annotator's file with the same name.
    pub fn counterpart(&self, file_name: &str) -> PathBuf {
        self.second_dir.join(file_name)
    }

    pub fn basedata_path(&self, document: &str, suffix: &str) -> PathBuf {
        self.basedata_dir.join(format!("{}{}", document, suffix))
    }
}

fn load_error(path: &Path, message: impl ToString) -> CorpusError {
    CorpusError::Load {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

fn list_dir(dir: &Path) -> CorpusResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| load_error(dir, e))? {
        let entry = entry.map_err(|e| load_error(dir, e))?;
        paths.push(entry.path());
    }
    Ok(paths)
}

fn glob_dir(dir: &Path, pattern: &str) -> CorpusResult<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .ok_or_else(|| load_error(dir, "path is not valid UTF-8"))?;
    let full_pattern = Path::new(&glob::Pattern::escape(dir_str)).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let mut paths = Vec::new();
    for entry in glob::glob(&full_pattern).map_err(|e| load_error(dir, e))? {
        paths.push(entry.map_err(|e| load_error(dir, e))?);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_markable_file_name() {
        assert_eq!(
            parse_markable_file_name("tweet_12_emo-expression_level.xml"),
            Some(MarkableFileName {
                document: "tweet_12".to_string(),
                level: "emo-expression".to_string(),
            })
        );
        assert_eq!(
            parse_markable_file_name("doc_Sentiment_LEVEL.XML").map(|n| n.level),
            Some("sentiment".to_string())
        );
        assert_eq!(parse_markable_file_name("doc.words.xml"), None);
    }

    #[test]
    fn test_markable_files_pattern_and_order() {
        let first = TempDir::new().unwrap();
        for name in [
            "b_emo-expression_level.xml",
            "a_emo-expression_level.xml",
            "a_sentiment_level.xml",
        ] {
            fs::write(first.path().join(name), "<markables/>").unwrap();
        }
        fs::create_dir(first.path().join("c_emo-expression_level.d")).unwrap();

        let layout = CorpusLayout::new("basedata", first.path(), "second");
        let names: Vec<_> = layout
            .markable_files("*emo-expression*")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["a_emo-expression_level.xml", "b_emo-expression_level.xml"]
        );

        assert_eq!(layout.markable_files("").unwrap().len(), 3);
    }

    #[test]
    fn test_validate_requires_annotator_directories() {
        let first = TempDir::new().unwrap();
        let layout = CorpusLayout::new("basedata", first.path(), "/nonexistent/annotator-2");
        assert!(matches!(layout.validate(), Err(CorpusError::Load { .. })));

        let layout = CorpusLayout::new("basedata", first.path(), first.path());
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_paths() {
        let layout = CorpusLayout::new("corpus/basedata", "corpus/a1", "corpus/a2");
        assert_eq!(
            layout.basedata_path("doc_1", ".words.xml"),
            Path::new("corpus/basedata/doc_1.words.xml")
        );
        assert_eq!(
            layout.counterpart("doc_1_emo-expression_level.xml"),
            Path::new("corpus/a2/doc_1_emo-expression_level.xml")
        );
    }
}
