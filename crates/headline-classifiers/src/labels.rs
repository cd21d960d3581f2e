//! Fixed mapping from raw classifier codes to sentiment labels

use crate::classifier::Classifier;
use headline_core::{Error, Result, Sentiment};
use std::time::Instant;

/// Total lookup table from the three model codes to sentiment labels.
///
/// Any code outside the table is an [`Error::UnmappedLabel`]; there is no
/// default bucket, so a model whose label set changed fails loudly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    entries: [(&'static str, Sentiment); 3],
}

impl LabelMap {
    /// Codes emitted by `cardiffnlp/twitter-roberta-base-sentiment`
    pub const fn cardiff() -> Self {
        Self {
            entries: [
                ("LABEL_0", Sentiment::Negative),
                ("LABEL_1", Sentiment::Neutral),
                ("LABEL_2", Sentiment::Positive),
            ],
        }
    }

    /// Map a raw code to its sentiment label
    pub fn map(&self, code: &str) -> Result<Sentiment> {
        self.entries
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, sentiment)| *sentiment)
            .ok_or_else(|| Error::UnmappedLabel(code.to_string()))
    }

    /// Raw code for a sentiment label
    pub fn code_for(&self, sentiment: Sentiment) -> &'static str {
        self.entries
            .iter()
            .find(|(_, s)| *s == sentiment)
            .map(|(code, _)| *code)
            .unwrap_or("")
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::cardiff()
    }
}

/// Mapped output of the [`SentimentAdapter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub label: Sentiment,
    pub confidence: f32,
}

/// Wraps a classifier backend and applies the label table
pub struct SentimentAdapter {
    classifier: Box<dyn Classifier>,
    labels: LabelMap,
}

impl SentimentAdapter {
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self::with_labels(classifier, LabelMap::default())
    }

    pub fn with_labels(classifier: Box<dyn Classifier>, labels: LabelMap) -> Self {
        Self { classifier, labels }
    }

    /// Name of the wrapped backend
    pub fn name(&self) -> &str {
        self.classifier.name()
    }

    /// Classify one text and map the result.
    ///
    /// Backend failures surface as [`Error::Classifier`]; a code outside the
    /// table surfaces as [`Error::UnmappedLabel`].
    pub async fn classify(&self, text: &str) -> Result<SentimentScore> {
        let start = Instant::now();
        let raw = self.classifier.classify(text).await?;

        if !raw.score.is_finite() || !(0.0..=1.0).contains(&raw.score) {
            return Err(Error::classifier(format!(
                "{} returned confidence {} outside [0, 1]",
                self.classifier.name(),
                raw.score
            )));
        }

        let label = self.labels.map(&raw.label)?;

        tracing::debug!(
            classifier = self.classifier.name(),
            code = %raw.label,
            %label,
            score = raw.score,
            elapsed_us = start.elapsed().as_micros() as u64,
            "classified headline"
        );

        Ok(SentimentScore {
            label,
            confidence: raw.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardiff_mapping_is_total() {
        let map = LabelMap::cardiff();
        assert_eq!(map.map("LABEL_0").unwrap(), Sentiment::Negative);
        assert_eq!(map.map("LABEL_1").unwrap(), Sentiment::Neutral);
        assert_eq!(map.map("LABEL_2").unwrap(), Sentiment::Positive);

        for sentiment in Sentiment::ALL {
            assert_eq!(map.map(map.code_for(sentiment)).unwrap(), sentiment);
        }
    }

    #[test]
    fn test_unknown_code_is_unmapped() {
        let err = LabelMap::default().map("LABEL_3").unwrap_err();
        assert!(matches!(err, Error::UnmappedLabel(code) if code == "LABEL_3"));
    }

    #[test]
    fn test_mapping_is_case_sensitive() {
        assert!(LabelMap::default().map("label_0").is_err());
        assert!(LabelMap::default().map("positive").is_err());
    }
}
