//! ATS analysis pipeline.
//!
//! Flow: extract JD + resume skills (concurrently) → aggregate score →
//! recommendations → `AnalysisResult`.
//!
//! Without a provider the whole pipeline is deterministic. With one, skill
//! extraction and recommendations try the provider first and silently fall
//! back on any failure, so analysis itself never fails.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::extractor::{AiExtractor, FallbackExtractor, LexicalExtractor, SkillSet};
use crate::ats::recommendations::Recommender;
use crate::ats::scoring::{aggregate, AtsScore, ScoreBreakdown};
use crate::ats::wordlists::WordLists;
use crate::llm_client::TextProvider;

/// Result of one resume/JD analysis.
///
/// `missing_skills` and `overlap_skills` partition `jd_skills`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub jd_skills: Vec<String>,
    pub resume_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub overlap_skills: Vec<String>,
    pub ats_score: u32,
    pub ats_breakdown: ScoreBreakdown,
    pub ats_recommendations: Vec<String>,
    pub keyword_match_pct: u32,
}

impl AnalysisResult {
    pub fn new(
        jd_skills: &SkillSet,
        resume_skills: &SkillSet,
        score: AtsScore,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            jd_skills: jd_skills.to_sorted_vec(),
            resume_skills: resume_skills.to_sorted_vec(),
            missing_skills: jd_skills.missing_from(resume_skills),
            overlap_skills: jd_skills.overlap(resume_skills),
            ats_score: score.total,
            ats_breakdown: score.breakdown,
            ats_recommendations: recommendations,
            keyword_match_pct: score.keyword_match_pct,
        }
    }
}

#[derive(Clone)]
pub struct Analyzer {
    extractor: FallbackExtractor,
    recommender: Recommender,
}

impl Analyzer {
    /// Provider-backed when `provider` is set, deterministic otherwise.
    pub fn new(wordlists: Arc<WordLists>, provider: Option<Arc<dyn TextProvider>>) -> Self {
        let lexical = LexicalExtractor::new(wordlists.clone());
        match provider {
            Some(provider) => Self {
                extractor: FallbackExtractor::new(
                    Arc::new(AiExtractor::new(provider.clone(), wordlists)),
                    lexical,
                ),
                recommender: Recommender::new(provider),
            },
            None => Self::deterministic_with(lexical),
        }
    }

    pub fn deterministic(wordlists: Arc<WordLists>) -> Self {
        Self::deterministic_with(LexicalExtractor::new(wordlists))
    }

    fn deterministic_with(lexical: LexicalExtractor) -> Self {
        Self {
            extractor: FallbackExtractor::lexical_only(lexical),
            recommender: Recommender::deterministic(),
        }
    }

    pub async fn analyze(&self, resume_text: &str, jd_text: &str) -> AnalysisResult {
        let (jd_skills, resume_skills) = tokio::join!(
            self.extractor.extract_skills(jd_text),
            self.extractor.extract_skills(resume_text)
        );

        let score = aggregate(resume_text, &jd_skills, &resume_skills);
        info!(
            "ATS score {}/100 (keyword match {}%, {} JD skills, {} resume skills)",
            score.total,
            score.keyword_match_pct,
            jd_skills.len(),
            resume_skills.len()
        );

        let recommendations = self
            .recommender
            .recommend(resume_text, jd_text, &score)
            .await;

        AnalysisResult::new(&jd_skills, &resume_skills, score, recommendations)
    }
}
