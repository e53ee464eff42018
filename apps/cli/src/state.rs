use std::sync::Arc;

use crate::classifier::SentenceClassifier;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state handed to every command handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable classification backend. Constructed once at startup; the
    /// filter engine never knows which backend it is talking to.
    pub classifier: Arc<dyn SentenceClassifier>,
    pub llm: LlmClient,
    /// Client for posting fetches, with the configured fetch timeout baked in.
    pub http: reqwest::Client,
}
