//! Axum route handlers for the ATS API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::access::RequireAccessCode;
use crate::ats::analyzer::AnalysisResult;
use crate::errors::AppError;
use crate::ingest::read_analysis_form;
use crate::pipeline::{analyze_and_generate, AnalyzeResponse};
use crate::state::AppState;

/// POST /api/ats-score
///
/// Deterministic scoring only; works without a provider.
pub async fn handle_ats_score(
    _access: RequireAccessCode,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = read_analysis_form(multipart, state.ingest_limits()).await?;

    let result = state
        .deterministic_analyzer()
        .analyze(&form.resume_text, &form.jd_text)
        .await;

    Ok(Json(result))
}

/// POST /api/analyze
///
/// Provider-backed analysis plus cover letter and tailored resume.
pub async fn handle_analyze(
    _access: RequireAccessCode,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let provider = state.require_provider()?;
    let form = read_analysis_form(multipart, state.ingest_limits()).await?;

    let response = analyze_and_generate(
        &state.analyzer(),
        provider.as_ref(),
        &form.resume_text,
        &form.jd_text,
        &[],
    )
    .await
    .map_err(|e| AppError::Llm(format!("Analysis generation failed: {e}")))?;

    Ok(Json(response))
}
