use std::sync::Arc;

use crate::ats::analyzer::Analyzer;
use crate::ats::wordlists::WordLists;
use crate::config::Config;
use crate::errors::AppError;
use crate::ingest::IngestLimits;
use crate::llm_client::TextProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no provider key is configured.
    pub llm: Option<Arc<dyn TextProvider>>,
    pub wordlists: Arc<WordLists>,
}

impl AppState {
    /// Provider-backed analyzer when a provider is configured.
    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.wordlists.clone(), self.llm.clone())
    }

    pub fn deterministic_analyzer(&self) -> Analyzer {
        Analyzer::deterministic(self.wordlists.clone())
    }

    pub fn require_provider(&self) -> Result<Arc<dyn TextProvider>, AppError> {
        self.llm.clone().ok_or_else(|| {
            AppError::ProviderUnavailable(
                "GEMINI_API_KEY is not configured; this endpoint needs a generative provider"
                    .to_string(),
            )
        })
    }

    pub fn ingest_limits(&self) -> IngestLimits {
        IngestLimits {
            max_upload_bytes: self.config.max_upload_bytes,
            max_jd_chars: self.config.max_jd_chars,
        }
    }
}
