//! Skill extraction: turns free text into a normalized `SkillSet`.
//!
//! Two backends share the `SkillExtractor` trait:
//! - `LexicalExtractor`: regex tokenizer + word-list filtering. Pure, deterministic.
//! - `AiExtractor`: asks the generative provider for a JSON array of skills.
//!
//! `FallbackExtractor` composes them: the AI backend is tried first and any
//! error (provider failure, malformed JSON) degrades to the lexical result.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::ats::prompts::SKILL_EXTRACTION_PROMPT_TEMPLATE;
use crate::ats::wordlists::WordLists;
use crate::llm_client::prompts::{excerpt, fill_template, JSON_ARRAY_ONLY};
use crate::llm_client::{call_json_array, LlmError, TextProvider};

/// Characters of input text forwarded to the provider.
pub const AI_INPUT_CHARS: usize = 2000;

/// Shortest skill kept, in characters (exclusive).
const MIN_SKILL_CHARS: usize = 2;

static SKILL_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z][A-Za-z0-9+\-/#]+").expect("skill token pattern"));

// ────────────────────────────────────────────────────────────────────────────
// SkillSet
// ────────────────────────────────────────────────────────────────────────────

/// Sorted, de-duplicated set of lowercase skills, each longer than two characters.
///
/// The invariant is enforced on construction, so every `SkillSet` is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Skills present in both sets, sorted.
    pub fn overlap(&self, other: &SkillSet) -> Vec<String> {
        self.0.intersection(&other.0).cloned().collect()
    }

    /// Skills in `self` that `other` lacks, sorted.
    pub fn missing_from(&self, other: &SkillSet) -> Vec<String> {
        self.0.difference(&other.0).cloned().collect()
    }

    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SkillSet(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| s.chars().count() > MIN_SKILL_CHARS)
                .collect(),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<SkillSet, LlmError>;

    /// Backend label for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LexicalExtractor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct LexicalExtractor {
    wordlists: Arc<WordLists>,
}

impl LexicalExtractor {
    pub fn new(wordlists: Arc<WordLists>) -> Self {
        Self { wordlists }
    }

    /// Tokenizes `text` and keeps candidate skills: lowercase, longer than
    /// two characters, not a stopword, not a non-technical term.
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        SKILL_TOKEN
            .find_iter(text)
            .map(|m| {
                m.as_str()
                    .trim_end_matches(|c: char| c == '-' || c == '/')
                    .to_lowercase()
            })
            .filter(|token| {
                token.chars().count() > MIN_SKILL_CHARS && !self.wordlists.is_filtered(token)
            })
            .collect()
    }
}

#[async_trait]
impl SkillExtractor for LexicalExtractor {
    async fn extract(&self, text: &str) -> Result<SkillSet, LlmError> {
        Ok(self.extract_skills(text))
    }

    fn backend(&self) -> &'static str {
        "lexical"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// AiExtractor
// ────────────────────────────────────────────────────────────────────────────

pub struct AiExtractor {
    provider: Arc<dyn TextProvider>,
    wordlists: Arc<WordLists>,
}

impl AiExtractor {
    pub fn new(provider: Arc<dyn TextProvider>, wordlists: Arc<WordLists>) -> Self {
        Self {
            provider,
            wordlists,
        }
    }
}

#[async_trait]
impl SkillExtractor for AiExtractor {
    async fn extract(&self, text: &str) -> Result<SkillSet, LlmError> {
        if text.trim().is_empty() {
            return Ok(SkillSet::default());
        }

        let prompt = fill_template(
            SKILL_EXTRACTION_PROMPT_TEMPLATE,
            &[
                ("json_only", JSON_ARRAY_ONLY),
                ("text", excerpt(text, AI_INPUT_CHARS)),
            ],
        );

        let values = call_json_array(self.provider.as_ref(), &prompt).await?;

        Ok(values
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !self.wordlists.ai_generic.contains(s))
            .collect())
    }

    fn backend(&self) -> &'static str {
        "ai"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Infallible extractor: tries the optional primary backend, falls back to
/// the lexical one on any error. With no primary it is purely lexical.
#[derive(Clone)]
pub struct FallbackExtractor {
    primary: Option<Arc<dyn SkillExtractor>>,
    fallback: LexicalExtractor,
}

impl FallbackExtractor {
    pub fn new(primary: Arc<dyn SkillExtractor>, fallback: LexicalExtractor) -> Self {
        Self {
            primary: Some(primary),
            fallback,
        }
    }

    pub fn lexical_only(fallback: LexicalExtractor) -> Self {
        Self {
            primary: None,
            fallback,
        }
    }

    pub async fn extract_skills(&self, text: &str) -> SkillSet {
        let Some(primary) = &self.primary else {
            return self.fallback.extract_skills(text);
        };

        match primary.extract(text).await {
            Ok(skills) => skills,
            Err(e) => {
                warn!(
                    "{} skill extraction failed, using lexical fallback: {e}",
                    primary.backend()
                );
                self.fallback.extract_skills(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubProvider;

    fn wordlists() -> Arc<WordLists> {
        Arc::new(WordLists::builtin().unwrap())
    }

    fn lexical() -> LexicalExtractor {
        LexicalExtractor::new(wordlists())
    }

    const RESUME: &str = "Experienced Python engineer with AWS, Docker and Kubernetes. \
        Wrote C++ services and owned CI/CD pipelines on PostgreSQL.";

    #[test]
    fn test_lexical_extracts_technical_tokens() {
        let skills = lexical().extract_skills(RESUME);
        for expected in ["python", "aws", "docker", "kubernetes", "c++", "ci/cd", "postgresql"] {
            assert!(skills.contains(expected), "missing {expected}: {skills:?}");
        }
    }

    #[test]
    fn test_lexical_drops_stopwords_and_soft_terms() {
        let skills = lexical().extract_skills(RESUME);
        for dropped in ["with", "and", "experienced", "the"] {
            assert!(!skills.contains(dropped), "{dropped} should be filtered");
        }
    }

    #[test]
    fn test_lexical_drops_short_tokens() {
        let skills = lexical().extract_skills("Go is an ML language, Rust is not");
        assert!(!skills.contains("go"));
        assert!(!skills.contains("ml"));
        assert!(skills.contains("rust"));
    }

    #[test]
    fn test_lexical_is_idempotent() {
        let extractor = lexical();
        assert_eq!(extractor.extract_skills(RESUME), extractor.extract_skills(RESUME));
    }

    #[test]
    fn test_lexical_empty_text_is_empty_set() {
        assert!(lexical().extract_skills("").is_empty());
    }

    #[test]
    fn test_lexical_trims_trailing_separators() {
        let skills = lexical().extract_skills("Terraform- and Ansible/ pipelines");
        assert!(skills.contains("terraform"));
        assert!(skills.contains("ansible"));
    }

    #[test]
    fn test_skill_set_invariants() {
        let skills: SkillSet = ["Rust", "rust", "Go", "  Kafka "].into_iter().collect();
        assert_eq!(skills.to_sorted_vec(), vec!["kafka", "rust"]);
    }

    #[test]
    fn test_overlap_and_missing_partition_jd() {
        let jd: SkillSet = ["rust", "kafka", "docker"].into_iter().collect();
        let resume: SkillSet = ["rust", "python"].into_iter().collect();
        assert_eq!(jd.overlap(&resume), vec!["rust"]);
        assert_eq!(jd.missing_from(&resume), vec!["docker", "kafka"]);
    }

    #[tokio::test]
    async fn test_ai_extractor_filters_generic_and_non_strings() {
        let provider = Arc::new(StubProvider::replying(
            "```json\n[\"Python\", \"AWS\", \"software\", 42, \"go\"]\n```",
        ));
        let extractor = AiExtractor::new(provider, wordlists());
        let skills = extractor.extract(RESUME).await.unwrap();
        assert_eq!(skills.to_sorted_vec(), vec!["aws", "python"]);
    }

    #[tokio::test]
    async fn test_ai_extractor_truncates_input() {
        let provider = Arc::new(StubProvider::replying("[]"));
        let extractor = AiExtractor::new(provider.clone(), wordlists());
        let text = "a".repeat(AI_INPUT_CHARS + 500);
        extractor.extract(&text).await.unwrap();

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].contains(&"a".repeat(AI_INPUT_CHARS)));
        assert!(!prompts[0].contains(&"a".repeat(AI_INPUT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_ai_extractor_skips_provider_for_empty_text() {
        let provider = Arc::new(StubProvider::replying("[\"rust\"]"));
        let extractor = AiExtractor::new(provider.clone(), wordlists());
        assert!(extractor.extract("  ").await.unwrap().is_empty());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_fallback_on_provider_error() {
        let provider = Arc::new(StubProvider::failing(503));
        let ai = Arc::new(AiExtractor::new(provider, wordlists()));
        let extractor = FallbackExtractor::new(ai, lexical());
        assert_eq!(
            extractor.extract_skills(RESUME).await,
            lexical().extract_skills(RESUME)
        );
    }

    #[tokio::test]
    async fn test_fallback_on_malformed_json() {
        let provider = Arc::new(StubProvider::replying("Sorry, I can't list skills today."));
        let ai = Arc::new(AiExtractor::new(provider, wordlists()));
        let extractor = FallbackExtractor::new(ai, lexical());
        assert_eq!(
            extractor.extract_skills(RESUME).await,
            lexical().extract_skills(RESUME)
        );
    }

    #[tokio::test]
    async fn test_fallback_on_non_array_json() {
        let provider = Arc::new(StubProvider::replying("{\"count\": 3}"));
        let ai = Arc::new(AiExtractor::new(provider, wordlists()));
        let extractor = FallbackExtractor::new(ai, lexical());
        assert!(extractor.extract_skills(RESUME).await.contains("kubernetes"));
    }

    #[tokio::test]
    async fn test_fallback_prefers_primary_when_it_succeeds() {
        let provider = Arc::new(StubProvider::replying("[\"terraform\"]"));
        let ai = Arc::new(AiExtractor::new(provider, wordlists()));
        let extractor = FallbackExtractor::new(ai, lexical());
        assert_eq!(
            extractor.extract_skills(RESUME).await.to_sorted_vec(),
            vec!["terraform"]
        );
    }
}
