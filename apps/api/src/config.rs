use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Application configuration loaded from environment variables.
///
/// The provider key is optional: without it the scoring core runs in
/// deterministic mode and provider-backed endpoints report a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub access_code: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub wordlists_path: Option<PathBuf>,
    pub provider_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub max_jd_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            access_code: None,
            port: 8080,
            rust_log: "info".to_string(),
            wordlists_path: None,
            provider_timeout_secs: 60,
            max_upload_bytes: 5 * 1024 * 1024,
            max_jd_chars: 10_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Ok(Config {
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            access_code: get("APP_ACCESS_CODE"),
            port: parse_or(get("PORT"), defaults.port, "PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            wordlists_path: get("WORDLISTS_PATH").map(PathBuf::from),
            provider_timeout_secs: parse_or(
                get("PROVIDER_TIMEOUT_SECS"),
                defaults.provider_timeout_secs,
                "PROVIDER_TIMEOUT_SECS must be a whole number of seconds",
            )?,
            max_upload_bytes: parse_or(
                get("MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
                "MAX_UPLOAD_BYTES must be a byte count",
            )?,
            max_jd_chars: parse_or(
                get("MAX_JD_CHARS"),
                defaults.max_jd_chars,
                "MAX_JD_CHARS must be a character count",
            )?,
        })
    }
}

fn parse_or<T>(raw: Option<String>, default: T, message: &'static str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value.trim().parse::<T>().context(message),
        None => Ok(default),
    }
}
