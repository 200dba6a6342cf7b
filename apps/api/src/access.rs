//! Shared-secret access gate for the API.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

pub const ACCESS_CODE_HEADER: &str = "x-access-code";
pub const ACCESS_DENIED: &str = "Invalid or missing Access Code";

/// Extractor that admits a request only when its `X-Access-Code` header
/// matches the configured code. With no code configured, nothing is admitted.
#[derive(Debug, Clone, Copy)]
pub struct RequireAccessCode;

#[async_trait]
impl FromRequestParts<AppState> for RequireAccessCode {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ACCESS_CODE_HEADER)
            .and_then(|h| h.to_str().ok());

        if access_granted(state.config.access_code.as_deref(), provided) {
            Ok(RequireAccessCode)
        } else {
            warn!(
                "Access denied for {} {}: header {}",
                parts.method,
                parts.uri.path(),
                if provided.is_some() { "mismatched" } else { "missing" }
            );
            Err(AppError::Forbidden(ACCESS_DENIED.to_string()))
        }
    }
}

/// Both sides are trimmed before comparing.
pub fn access_granted(expected: Option<&str>, provided: Option<&str>) -> bool {
    match (expected, provided) {
        (Some(expected), Some(provided)) => {
            let expected = expected.trim();
            !expected.is_empty() && expected == provided.trim()
        }
        _ => false,
    }
}
