//! Keyword lexicon classifier
//!
//! Offline backend used when no model weights are available. It emits the
//! same three codes as the RoBERTa model so the label table applies unchanged.

use crate::classifier::{Classifier, RawPrediction};
use crate::labels::LabelMap;
use aho_corasick::{AhoCorasick, MatchKind};
use headline_core::{Error, Result, Sentiment};

const POSITIVE: &[&str] = &[
    "good",
    "great",
    "excellent",
    "love",
    "amazing",
    "wonderful",
    "happy",
    "fantastic",
    "awesome",
    "best",
    "soar",
    "soars",
    "surge",
    "surges",
    "record high",
    "breakthrough",
];

const NEGATIVE: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "horrible",
    "worst",
    "sad",
    "angry",
    "disappointed",
    "poor",
    "crash",
    "crashes",
    "plunge",
    "plunges",
    "collapse",
    "scandal",
    "disaster",
];

pub struct LexiconClassifier {
    name: String,
    positive: AhoCorasick,
    negative: AhoCorasick,
    labels: LabelMap,
}

impl LexiconClassifier {
    pub fn new() -> Result<Self> {
        Self::with_name("sentiment-lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            positive: build_matcher(POSITIVE, "positive")?,
            negative: build_matcher(NEGATIVE, "negative")?,
            labels: LabelMap::cardiff(),
        })
    }
}

fn build_matcher(words: &[&str], kind: &str) -> Result<AhoCorasick> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(words)
        .map_err(|e| Error::classifier(format!("Failed to build {kind} sentiment matcher: {e}")))
}

/// Keyword hits that stand as whole words; "bad" inside "Islamabad" is no hit
fn whole_word_hits(matcher: &AhoCorasick, text: &str) -> usize {
    matcher
        .find_iter(text)
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count()
}

#[async_trait::async_trait]
impl Classifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<RawPrediction> {
        let positive_hits = whole_word_hits(&self.positive, text) as f32;
        let negative_hits = whole_word_hits(&self.negative, text) as f32;
        let total = positive_hits + negative_hits;

        // No keyword evidence reads as fully neutral.
        let (negative, neutral, positive) = if total == 0.0 {
            (0.0, 1.0, 0.0)
        } else if positive_hits == negative_hits {
            (0.25, 0.5, 0.25)
        } else {
            (negative_hits / total, 0.0, positive_hits / total)
        };

        let scores = vec![
            (self.labels.code_for(Sentiment::Negative).to_string(), negative),
            (self.labels.code_for(Sentiment::Neutral).to_string(), neutral),
            (self.labels.code_for(Sentiment::Positive).to_string(), positive),
        ];

        RawPrediction::from_scores(scores)
            .ok_or_else(|| Error::classifier("Lexicon produced no class scores"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
