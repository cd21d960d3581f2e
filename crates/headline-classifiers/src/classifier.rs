//! Classifier trait and raw model output

use async_trait::async_trait;
use headline_core::Result;

/// Trait for all sentiment classifier backends
///
/// Backends report the model's own label code; mapping to a
/// [`headline_core::Sentiment`] happens in [`crate::SentimentAdapter`].
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text
    async fn classify(&self, text: &str) -> Result<RawPrediction>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Raw output of a classifier backend
#[derive(Debug, Clone)]
pub struct RawPrediction {
    /// Model label code (e.g. `LABEL_2`)
    pub label: String,

    /// Confidence score (0.0-1.0)
    pub score: f32,

    /// All class scores, in model label order
    pub all_scores: Vec<(String, f32)>,
}

impl RawPrediction {
    /// Create a new prediction
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
            all_scores: Vec::new(),
        }
    }

    /// Pick the highest-scoring class out of `scores`.
    ///
    /// Returns `None` when `scores` is empty.
    pub fn from_scores(scores: Vec<(String, f32)>) -> Option<Self> {
        let (label, score) = scores
            .iter()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(label, score)| (label.clone(), *score))?;

        Some(Self {
            label,
            score,
            all_scores: scores,
        })
    }
}
