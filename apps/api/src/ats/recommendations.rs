//! ATS recommendations: provider-written advice with a rule-based fallback.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::ats::prompts::RECOMMENDATION_PROMPT_TEMPLATE;
use crate::ats::scoring::{AtsScore, ScoreBreakdown};
use crate::llm_client::prompts::{excerpt, fill_template, JSON_ARRAY_ONLY};
use crate::llm_client::{call_json_array, LlmError, TextProvider};

pub const MAX_RECOMMENDATIONS: usize = 5;
/// Characters of JD and resume text quoted in the prompt.
const PROMPT_EXCERPT_CHARS: usize = 500;

pub const ADD_KEYWORDS: &str = "Add more keywords from the job description to your resume";
pub const USE_STANDARD_SECTIONS: &str =
    "Use standard section headers like 'Experience', 'Education', 'Skills'";
pub const SHOW_CONTACT_INFO: &str = "Ensure your email and phone number are clearly visible";

/// Produces up to five improvement suggestions for a scored resume.
#[derive(Clone, Default)]
pub struct Recommender {
    provider: Option<Arc<dyn TextProvider>>,
}

impl Recommender {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Rule-based only.
    pub fn deterministic() -> Self {
        Self::default()
    }

    pub async fn recommend(
        &self,
        resume_text: &str,
        jd_text: &str,
        score: &AtsScore,
    ) -> Vec<String> {
        let Some(provider) = &self.provider else {
            return fallback_recommendations(&score.breakdown);
        };

        match ai_recommendations(provider.as_ref(), resume_text, jd_text, score).await {
            Ok(recommendations) => recommendations,
            Err(e) => {
                warn!("AI recommendations unavailable, using rule-based fallback: {e}");
                fallback_recommendations(&score.breakdown)
            }
        }
    }
}

async fn ai_recommendations(
    provider: &dyn TextProvider,
    resume_text: &str,
    jd_text: &str,
    score: &AtsScore,
) -> Result<Vec<String>, LlmError> {
    let breakdown = score
        .breakdown
        .entries()
        .iter()
        .map(|(name, value, cap)| format!("- {name}: {value}/{cap}"))
        .collect::<Vec<_>>()
        .join("\n");

    let total = score.total.to_string();
    let prompt = fill_template(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ARRAY_ONLY),
            ("total", &total),
            ("breakdown", &breakdown),
            ("jd_excerpt", excerpt(jd_text, PROMPT_EXCERPT_CHARS)),
            ("resume_excerpt", excerpt(resume_text, PROMPT_EXCERPT_CHARS)),
        ],
    );

    let values = call_json_array(provider, &prompt).await?;
    let recommendations = values
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Ok(s.trim().to_string()),
            other => Err(LlmError::Shape(format!(
                "expected a string recommendation, found {other}"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let recommendations: Vec<String> = recommendations
        .into_iter()
        .filter(|r| !r.is_empty())
        .take(MAX_RECOMMENDATIONS)
        .collect();

    if recommendations.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(recommendations)
}

/// Fixed rules keyed on weak sub-scores, in rule order.
pub fn fallback_recommendations(breakdown: &ScoreBreakdown) -> Vec<String> {
    let rules = [
        (breakdown.keywords < 25, ADD_KEYWORDS),
        (breakdown.sections < 15, USE_STANDARD_SECTIONS),
        (breakdown.contact < 8, SHOW_CONTACT_INFO),
    ];

    rules
        .into_iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, text)| text.to_string())
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
