use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// `.env` is honored when present; required variables fail startup early.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Bearer token for the Hugging Face Inference API. Optional: anonymous
    /// calls work but are aggressively rate limited.
    pub hf_api_token: Option<String>,
    /// Zero-shot model id. The classifier contract does not depend on it.
    pub classifier_model: String,
    /// Directory holding input resumes and the pipeline's output artifacts.
    pub data_dir: PathBuf,
    pub fetch_timeout_secs: u64,
    pub score_threshold: f32,
    pub min_line_tokens: usize,
    pub min_sentence_tokens: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            hf_api_token: std::env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            classifier_model: std::env::var("CLASSIFIER_MODEL")
                .unwrap_or_else(|_| "facebook/bart-large-mnli".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", 15)?,
            score_threshold: parse_env("SCORE_THRESHOLD", 0.3)?,
            min_line_tokens: parse_env("MIN_LINE_TOKENS", 3)?,
            min_sentence_tokens: parse_env("MIN_SENTENCE_TOKENS", 5)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid value")),
        Err(_) => Ok(default),
    }
}
