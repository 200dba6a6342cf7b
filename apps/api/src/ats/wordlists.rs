//! Word lists that drive lexical skill filtering.
//!
//! The lists are data, not code: a versioned JSON document embedded as the
//! built-in default and overridable from disk (`WORDLISTS_PATH`). Loaded once
//! at start-up and shared read-only behind an `Arc`.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

const BUILTIN_WORDLISTS: &str = include_str!("../../data/wordlists.json");

#[derive(Debug, Deserialize)]
struct WordListsFile {
    version: u32,
    stopwords: Vec<String>,
    non_technical: Vec<String>,
    #[serde(default)]
    ai_generic: Vec<String>,
}

/// Immutable filtering sets, all entries lowercase.
#[derive(Debug, Clone)]
pub struct WordLists {
    pub version: u32,
    /// Articles, pronouns, conjunctions and other function words.
    pub stopwords: HashSet<String>,
    /// Soft skills, HR boilerplate and vague tech buzzwords.
    pub non_technical: HashSet<String>,
    /// Generic words stripped from AI-extracted skills.
    pub ai_generic: HashSet<String>,
}

impl WordLists {
    /// The lists shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_WORDLISTS).context("built-in word lists are malformed")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read word lists from {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("failed to parse word lists in {}", path.display()))
    }

    /// Loads from `path` when given, otherwise the built-in lists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: WordListsFile = serde_json::from_str(raw)?;
        Ok(Self {
            version: file.version,
            stopwords: normalize(file.stopwords),
            non_technical: normalize(file.non_technical),
            ai_generic: normalize(file.ai_generic),
        })
    }

    /// True when the (lowercase) token is filtered by the lexical extractor.
    pub fn is_filtered(&self, token: &str) -> bool {
        self.stopwords.contains(token) || self.non_technical.contains(token)
    }
}

fn normalize(words: Vec<String>) -> HashSet<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_lists_load() {
        let lists = WordLists::builtin().unwrap();
        assert_eq!(lists.version, 1);
        assert!(lists.stopwords.len() >= 150);
        assert!(lists.non_technical.len() >= 150);
        assert!(lists.stopwords.contains("the"));
        assert!(lists.non_technical.contains("communication"));
        assert!(lists.ai_generic.contains("frameworks"));
    }

    #[test]
    fn test_builtin_lists_do_not_filter_real_skills() {
        let lists = WordLists::builtin().unwrap();
        for skill in ["python", "rust", "kubernetes", "postgresql", "react"] {
            assert!(!lists.is_filtered(skill), "{skill} should survive filtering");
        }
    }

    #[test]
    fn test_from_json_normalizes_case_and_blanks() {
        let lists = WordLists::from_json(
            r#"{"version": 7, "stopwords": ["The", " "], "non_technical": ["Synergy"]}"#,
        )
        .unwrap();
        assert_eq!(lists.version, 7);
        assert!(lists.stopwords.contains("the"));
        assert_eq!(lists.stopwords.len(), 1);
        assert!(lists.is_filtered("synergy"));
        assert!(lists.ai_generic.is_empty());
    }

    #[test]
    fn test_from_path_overrides_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": 2, "stopwords": ["and"], "non_technical": ["rockstar"], "ai_generic": []}}"#
        )
        .unwrap();

        let lists = WordLists::load(Some(file.path())).unwrap();
        assert_eq!(lists.version, 2);
        assert!(lists.is_filtered("rockstar"));
        assert!(!lists.is_filtered("the"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = WordLists::from_path(Path::new("/nonexistent/wordlists.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read word lists"));
    }
}
