//! Relevance classifier. The only module that talks to the zero-shot
//! classification service; everything else goes through `SentenceClassifier`.
//!
//! The default backend wraps the Hugging Face Inference API zero-shot task.
//! The model id is configuration, not contract: swapping backends must not
//! change the accept/reject outcome for any sentence.

use std::cmp::Ordering;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const HF_INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models";
/// Cold model spins up on the first request, which can take a while.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Classifier returned an empty ranking")]
    EmptyRanking,

    #[error("Classifier returned mismatched labels and scores")]
    MalformedResponse,
}

/// The fixed candidate label set: five relevant categories plus one
/// catch-all. Built once at startup and shared for the process lifetime.
#[derive(Debug, Clone)]
pub struct LabelSet {
    relevant: Vec<String>,
    unrelated: String,
}

impl LabelSet {
    /// Labels for job/internship posting relevance.
    pub fn job_posting() -> Self {
        Self {
            relevant: [
                "internship description",
                "job description",
                "company hiring information",
                "recruitment posting",
                "career opportunity",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            unrelated: "unrelated text".to_string(),
        }
    }

    /// All candidate labels in their fixed order, catch-all last.
    pub fn candidates(&self) -> Vec<&str> {
        self.relevant
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.unrelated.as_str()))
            .collect()
    }

    pub fn is_unrelated(&self, label: &str) -> bool {
        label == self.unrelated
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::job_posting()
    }
}

/// One (label, score) pair from a classification.
#[derive(Debug, Clone)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Ranked classification of a single sentence.
/// Invariant: non-empty, sorted descending by score.
#[derive(Debug, Clone)]
pub struct Classification {
    ranked: Vec<LabelScore>,
}

impl Classification {
    pub fn new(mut ranked: Vec<LabelScore>) -> Result<Self, ClassifierError> {
        if ranked.is_empty() {
            return Err(ClassifierError::EmptyRanking);
        }
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Ok(Self { ranked })
    }

    /// The top-ranked label. Total by construction.
    pub fn top(&self) -> &LabelScore {
        &self.ranked[0]
    }
}

/// Seam between the filter engine and the classification backend.
/// Carried as `Arc<dyn SentenceClassifier>` in `AppState`.
#[async_trait]
pub trait SentenceClassifier: Send + Sync {
    async fn classify(
        &self,
        sentence: &str,
        labels: &LabelSet,
    ) -> Result<Classification, ClassifierError>;
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters {
    candidate_labels: String,
}

#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

impl ZeroShotResponse {
    fn into_classification(self) -> Result<Classification, ClassifierError> {
        if self.labels.len() != self.scores.len() {
            return Err(ClassifierError::MalformedResponse);
        }
        let ranked = self
            .labels
            .into_iter()
            .zip(self.scores)
            .map(|(label, score)| LabelScore { label, score })
            .collect();
        Classification::new(ranked)
    }
}

/// Zero-shot classifier backed by the Hugging Face Inference API.
///
/// Deliberately retry-free: a failed call aborts the whole filtering run, so
/// the caller never sees a partially filtered posting.
pub struct HfZeroShotClassifier {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HfZeroShotClassifier {
    pub fn new(model: &str, api_token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: format!("{HF_INFERENCE_BASE}/{model}"),
            api_token,
        }
    }
}

#[async_trait]
impl SentenceClassifier for HfZeroShotClassifier {
    async fn classify(
        &self,
        sentence: &str,
        labels: &LabelSet,
    ) -> Result<Classification, ClassifierError> {
        let request_body = ZeroShotRequest {
            inputs: sentence,
            parameters: ZeroShotParameters {
                candidate_labels: labels.candidates().join(","),
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&request_body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let zero_shot: ZeroShotResponse = response.json().await?;
        let classification = zero_shot.into_classification()?;

        debug!(
            top_label = %classification.top().label,
            top_score = classification.top().score,
            "Sentence classified"
        );

        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_set_has_six_candidates_catch_all_last() {
        let labels = LabelSet::job_posting();
        let candidates = labels.candidates();
        assert_eq!(candidates.len(), 6);
        assert_eq!(candidates[0], "internship description");
        assert_eq!(candidates[5], "unrelated text");
    }

    #[test]
    fn test_label_set_is_unrelated() {
        let labels = LabelSet::job_posting();
        assert!(labels.is_unrelated("unrelated text"));
        assert!(!labels.is_unrelated("job description"));
    }

    #[test]
    fn test_classification_sorts_descending() {
        let c = Classification::new(vec![
            LabelScore {
                label: "job description".to_string(),
                score: 0.2,
            },
            LabelScore {
                label: "career opportunity".to_string(),
                score: 0.7,
            },
        ])
        .unwrap();
        assert_eq!(c.top().label, "career opportunity");
        assert_eq!(c.ranked.len(), 2);
        assert!(c.ranked[0].score >= c.ranked[1].score);
    }

    #[test]
    fn test_classification_rejects_empty_ranking() {
        let result = Classification::new(vec![]);
        assert!(matches!(result, Err(ClassifierError::EmptyRanking)));
    }

    #[test]
    fn test_zero_shot_response_deserializes() {
        let json = r#"{
            "sequence": "We are hiring a backend engineer.",
            "labels": ["job description", "recruitment posting", "unrelated text"],
            "scores": [0.8, 0.15, 0.05]
        }"#;
        let response: ZeroShotResponse = serde_json::from_str(json).unwrap();
        let classification = response.into_classification().unwrap();
        assert_eq!(classification.top().label, "job description");
        assert!((classification.top().score - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_shot_response_mismatched_arrays_is_error() {
        let response = ZeroShotResponse {
            labels: vec!["job description".to_string()],
            scores: vec![0.8, 0.2],
        };
        assert!(matches!(
            response.into_classification(),
            Err(ClassifierError::MalformedResponse)
        ));
    }
}
