use thiserror::Error;

use crate::classifier::ClassifierError;

/// Application-level error type. Every failure in the pipeline is fatal for
/// the current run and carries its original cause; there are no retries and
/// no partial results below this layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch posting: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Posting URL returned HTTP {status}: {url}")]
    FetchStatus { status: u16, url: String },

    #[error("Classification error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
