//! Full application pipeline: ATS analysis plus generated content.

use serde::{Deserialize, Serialize};

use crate::ats::analyzer::{AnalysisResult, Analyzer};
use crate::generation::generator::{generate_content, GeneratedContent};
use crate::llm_client::{LlmError, TextProvider};

/// `AnalysisResult` with the generated content merged in at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    #[serde(flatten)]
    pub generated: GeneratedContent,
}

/// Scores the resume and generates content concurrently. Scoring never
/// fails; a generation failure fails the whole call.
pub async fn analyze_and_generate(
    analyzer: &Analyzer,
    provider: &dyn TextProvider,
    resume_text: &str,
    jd_text: &str,
    bullets: &[String],
) -> Result<AnalyzeResponse, LlmError> {
    let (analysis, generated) = tokio::join!(
        analyzer.analyze(resume_text, jd_text),
        generate_content(provider, resume_text, jd_text, bullets)
    );

    Ok(AnalyzeResponse {
        analysis,
        generated: generated?,
    })
}
