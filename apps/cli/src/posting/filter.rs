//! Posting filter engine. Normalizes raw posting text, splits it into
//! sentences, classifies each one against the fixed label set, and keeps the
//! sentences judged relevant.
//!
//! Classification is sequential and per-sentence in document order. A single
//! classifier failure aborts the whole run; there is no partially filtered
//! output and no retry at this layer.

use std::sync::Arc;

use tracing::debug;

use crate::classifier::{LabelSet, SentenceClassifier};
use crate::errors::AppError;
use crate::posting::normalize::{normalize, split_sentences, token_count};

/// Acceptance policy knobs. The defaults are the only values the pipeline has
/// ever shipped with; they are configurable rather than structural.
#[derive(Debug, Clone, Copy)]
pub struct FilterPolicy {
    /// Top-label score must be strictly greater than this to keep a sentence.
    pub score_threshold: f32,
    /// Lines with fewer tokens are dropped during normalization.
    pub min_line_tokens: usize,
    /// Sentences with fewer tokens are never classified.
    pub min_sentence_tokens: usize,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            score_threshold: 0.3,
            min_line_tokens: 3,
            min_sentence_tokens: 5,
        }
    }
}

/// Filters posting text down to relevant sentences via an injected classifier.
pub struct PostingFilter {
    classifier: Arc<dyn SentenceClassifier>,
    labels: LabelSet,
    policy: FilterPolicy,
}

impl PostingFilter {
    pub fn new(classifier: Arc<dyn SentenceClassifier>, policy: FilterPolicy) -> Self {
        Self {
            classifier,
            labels: LabelSet::job_posting(),
            policy,
        }
    }

    /// Returns the newline-joined relevant sentences in document order.
    ///
    /// An empty string is a valid outcome (nothing survived filtering), not an
    /// error. Any classifier failure aborts the run.
    pub async fn filter_posting(&self, raw_text: &str) -> Result<String, AppError> {
        let lines = normalize(raw_text, self.policy.min_line_tokens);
        let blob = lines.join("\n");

        let sentences = split_sentences(&blob);
        debug!(candidates = sentences.len(), "Split posting into sentences");

        let mut kept = Vec::new();
        for sentence in sentences {
            if token_count(sentence) < self.policy.min_sentence_tokens {
                continue;
            }

            let classification = self.classifier.classify(sentence, &self.labels).await?;
            let top = classification.top();

            if !self.labels.is_unrelated(&top.label) && top.score > self.policy.score_threshold {
                kept.push(sentence.trim().to_string());
            } else {
                debug!(label = %top.label, score = top.score, "Dropped sentence");
            }
        }

        Ok(kept.join("\n"))
    }
}
