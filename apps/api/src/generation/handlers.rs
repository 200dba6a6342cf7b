//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::access::RequireAccessCode;
use crate::errors::AppError;
use crate::generation::generator::{generate_cover_letter, rewrite_bullets};
use crate::ingest::validate_jd;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub bullets: Vec<String>,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub rewritten_bullets: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/rewrite
pub async fn handle_rewrite(
    _access: RequireAccessCode,
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    let provider = state.require_provider()?;
    validate_jd(&request.jd_text, state.config.max_jd_chars)?;

    let rewritten_bullets = rewrite_bullets(provider.as_ref(), &request.bullets, &request.jd_text)
        .await
        .map_err(|e| AppError::Llm(format!("Bullet rewrite failed: {e}")))?;

    Ok(Json(RewriteResponse { rewritten_bullets }))
}

/// POST /api/cover-letter
pub async fn handle_cover_letter(
    _access: RequireAccessCode,
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let provider = state.require_provider()?;
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    validate_jd(&request.jd_text, state.config.max_jd_chars)?;

    let cover_letter =
        generate_cover_letter(provider.as_ref(), &request.resume_text, &request.jd_text)
            .await
            .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}
