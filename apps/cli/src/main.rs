mod classifier;
mod cli;
mod commands;
mod config;
mod errors;
mod llm_client;
mod posting;
mod resume;
mod state;
mod tailor;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classifier::HfZeroShotClassifier;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::posting::fetch::build_http_client;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the zero-shot classifier once; it is reused for every
    // sentence of the run.
    let classifier = Arc::new(HfZeroShotClassifier::new(
        &config.classifier_model,
        config.hf_api_token.clone(),
    ));
    info!(model = %config.classifier_model, "Zero-shot classifier initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!(model = llm_client::MODEL, "LLM client initialized");

    // Posting fetches get their own client with a short timeout
    let http = build_http_client(config.fetch_timeout_secs);

    let state = AppState {
        config,
        classifier,
        llm,
        http,
    };

    match cli.command {
        Commands::Parse { file } => {
            commands::parse(&state, &file).await?;
        }
        Commands::Fetch { url } => {
            commands::fetch(&state, &url).await?;
        }
        Commands::Suggest => {
            commands::suggest(&state).await?;
        }
        Commands::Run => {
            commands::run(&state).await?;
        }
    }

    Ok(())
}
