use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resumeboost::ats::wordlists::WordLists;
use resumeboost::config::Config;
use resumeboost::llm_client::{GeminiClient, TextProvider};
use resumeboost::routes::build_router;
use resumeboost::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeBoost API v{}", env!("CARGO_PKG_VERSION"));

    let wordlists = Arc::new(WordLists::load(config.wordlists_path.as_deref())?);
    info!("Word lists loaded (version {})", wordlists.version);

    let llm = build_provider(&config)?;

    let state = AppState {
        config: config.clone(),
        llm,
        wordlists,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Gemini client when a key is configured; otherwise the service runs with
/// deterministic scoring only.
fn build_provider(config: &Config) -> Result<Option<Arc<dyn TextProvider>>> {
    let Some(api_key) = config.gemini_api_key.clone() else {
        warn!("GEMINI_API_KEY not set; provider-backed endpoints will return 503");
        return Ok(None);
    };

    let client = GeminiClient::new(
        api_key,
        config.gemini_model.clone(),
        Duration::from_secs(config.provider_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", client.model());
    Ok(Some(Arc::new(client)))
}
