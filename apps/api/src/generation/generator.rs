//! Application content generation: bullet rewrites, cover letter and a
//! tailored resume.
//!
//! Generated prose has no deterministic fallback, so provider failures
//! propagate to the caller. The one exception is a malformed bullet reply,
//! which is salvaged line by line.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::generation::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, REWRITE_BULLETS_PROMPT_TEMPLATE, TAILORED_RESUME_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{fill_template, JSON_ARRAY_ONLY};
use crate::llm_client::{parse_json_array, LlmError, TextProvider};

/// Everything generated for one application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub rewritten_bullets: Vec<String>,
    pub cover_letter: String,
    pub tailored_resume: String,
}

/// Rewrites `bullets` to align with the JD. Empty input makes no provider call.
pub async fn rewrite_bullets(
    provider: &dyn TextProvider,
    bullets: &[String],
    jd_text: &str,
) -> Result<Vec<String>, LlmError> {
    if bullets.is_empty() {
        return Ok(Vec::new());
    }

    let bullets_json = serde_json::to_string_pretty(bullets)?;
    let prompt = fill_template(
        REWRITE_BULLETS_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ARRAY_ONLY),
            ("bullets_json", &bullets_json),
            ("jd_text", jd_text),
        ],
    );

    let reply = provider.complete(&prompt).await?;
    let rewritten = parse_rewritten_bullets(&reply);
    info!("Rewrote {} bullets into {}", bullets.len(), rewritten.len());
    Ok(rewritten)
}

/// A JSON string array when the reply is one, otherwise its non-blank lines
/// with list markers stripped.
pub fn parse_rewritten_bullets(reply: &str) -> Vec<String> {
    let as_strings = parse_json_array(reply).ok().and_then(|values| {
        values
            .into_iter()
            .map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
    });

    match as_strings {
        Some(bullets) => bullets,
        None => {
            warn!("Bullet rewrite reply was not a JSON string array; splitting lines");
            reply
                .lines()
                .map(|line| line.trim_matches(|c: char| c == '-' || c == '•' || c.is_whitespace()))
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        }
    }
}

pub async fn generate_cover_letter(
    provider: &dyn TextProvider,
    resume_text: &str,
    jd_text: &str,
) -> Result<String, LlmError> {
    let prompt = fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[("jd_text", jd_text), ("resume_text", resume_text)],
    );
    let letter = provider.complete(&prompt).await?;
    Ok(letter.trim().to_string())
}

/// Full resume rewrite in Markdown.
pub async fn generate_tailored_resume(
    provider: &dyn TextProvider,
    resume_text: &str,
    jd_text: &str,
) -> Result<String, LlmError> {
    let prompt = fill_template(
        TAILORED_RESUME_PROMPT_TEMPLATE,
        &[("jd_text", jd_text), ("resume_text", resume_text)],
    );
    let resume = provider.complete(&prompt).await?;
    Ok(resume.trim().to_string())
}

/// Runs the three generators concurrently; the first failure wins.
pub async fn generate_content(
    provider: &dyn TextProvider,
    resume_text: &str,
    jd_text: &str,
    bullets: &[String],
) -> Result<GeneratedContent, LlmError> {
    let (rewritten_bullets, cover_letter, tailored_resume) = tokio::try_join!(
        rewrite_bullets(provider, bullets, jd_text),
        generate_cover_letter(provider, resume_text, jd_text),
        generate_tailored_resume(provider, resume_text, jd_text),
    )?;

    Ok(GeneratedContent {
        rewritten_bullets,
        cover_letter,
        tailored_resume,
    })
}
