//! Agreement run configuration.

use crate::errors::{CorpusError, CorpusResult};
use mmax_agreement::ComparisonMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one agreement run, usually read from a TOML file and then
/// overridden from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgreementConfig {
    /// How spans of the two annotators are matched.
    pub mode: ComparisonMode,
    /// Shell pattern selecting markable files in the first directory.
    pub pattern: String,
    /// Markable level to compare.
    pub level: String,
    /// Suffix appended to a document's base name to find its basedata file.
    pub basedata_suffix: String,
}

impl Default for AgreementConfig {
    fn default() -> Self {
        Self {
            mode: ComparisonMode::Binary,
            pattern: "*emo-expression*".into(),
            level: "emo-expression".into(),
            basedata_suffix: ".words.xml".into(),
        }
    }
}

impl AgreementConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CorpusResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| CorpusError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| CorpusError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
