//! Posts, sentiment labels, and classification tables

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One retrieved forum post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Title text
    pub text: String,

    /// Canonical link
    pub link: String,

    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(text: impl Into<String>, link: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            created_at,
        }
    }
}

/// Sort posts newest first.
///
/// The sort is stable, so posts sharing a timestamp keep their fetch order.
pub fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

/// Sentiment label after mapping from the raw classifier code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            "positive" => Ok(Self::Positive),
            other => Err(Error::UnmappedLabel(other.to_string())),
        }
    }
}

/// Classification of a single post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Headline text that was classified
    pub text: String,

    /// Link of the source post
    pub link: String,

    /// Mapped sentiment label
    pub label: Sentiment,

    /// Classifier confidence (0.0-1.0)
    pub confidence: f32,
}

impl ClassificationResult {
    pub fn new(post: &Post, label: Sentiment, confidence: f32) -> Self {
        Self {
            text: post.text.clone(),
            link: post.link.clone(),
            label,
            confidence,
        }
    }

    /// Whether this result survives the confidence filter
    pub fn passes(&self, threshold: f32) -> bool {
        self.confidence >= threshold && self.label != Sentiment::Neutral
    }
}

/// Every classification of a run, newest post first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    results: Vec<ClassificationResult>,
}

impl ResultTable {
    pub fn new(results: Vec<ClassificationResult>) -> Self {
        Self { results }
    }

    /// Keep non-neutral results whose confidence is at least `threshold`.
    ///
    /// The bound is inclusive and order is preserved.
    pub fn filter(&self, threshold: f32) -> FilteredTable {
        FilteredTable {
            results: self
                .results
                .iter()
                .filter(|r| r.passes(threshold))
                .cloned()
                .collect(),
        }
    }

    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FromIterator<ClassificationResult> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ClassificationResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Subsequence of a [`ResultTable`] that passed the confidence filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredTable {
    results: Vec<ClassificationResult>,
}

impl FilteredTable {
    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassificationResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilteredTable {
    type Item = &'a ClassificationResult;
    type IntoIter = std::slice::Iter<'a, ClassificationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn result(label: Sentiment, confidence: f32) -> ClassificationResult {
        ClassificationResult {
            text: format!("{label} {confidence}"),
            link: "https://example.com".to_string(),
            label,
            confidence,
        }
    }

    #[test]
    fn test_newest_first_reorders() {
        let posts = vec![
            Post::new("Great news!", "u1", at(100)),
            Post::new("Bad day", "u2", at(200)),
        ];

        let sorted = newest_first(posts);
        assert_eq!(sorted[0].text, "Bad day");
        assert_eq!(sorted[0].link, "u2");
        assert_eq!(sorted[1].text, "Great news!");
    }

    #[test]
    fn test_newest_first_is_stable_on_ties() {
        let posts = vec![
            Post::new("first", "a", at(50)),
            Post::new("second", "b", at(50)),
            Post::new("newest", "c", at(60)),
        ];

        let sorted = newest_first(posts);
        let texts: Vec<_> = sorted.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["newest", "first", "second"]);
    }

    #[test]
    fn test_neutral_always_excluded() {
        let table = ResultTable::new(vec![result(Sentiment::Neutral, 0.9)]);
        assert!(table.filter(0.0).is_empty());
        assert!(table.filter(0.5).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let table = ResultTable::new(vec![
            result(Sentiment::Positive, 0.75),
            result(Sentiment::Negative, 0.749999),
        ]);

        let filtered = table.filter(0.75);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.results()[0].confidence, 0.75);
    }

    #[test]
    fn test_filter_preserves_order() {
        let table = ResultTable::new(vec![
            result(Sentiment::Negative, 0.9),
            result(Sentiment::Neutral, 0.99),
            result(Sentiment::Positive, 0.8),
            result(Sentiment::Positive, 0.1),
        ]);

        let labels: Vec<_> = table.filter(0.5).iter().map(|r| r.label).collect();
        assert_eq!(labels, [Sentiment::Negative, Sentiment::Positive]);
    }

    #[test]
    fn test_empty_table_filters_to_empty() {
        assert!(ResultTable::default().filter(0.75).is_empty());
    }

    #[test]
    fn test_sentiment_parse_and_display() {
        for sentiment in Sentiment::ALL {
            assert_eq!(sentiment.as_str().parse::<Sentiment>().unwrap(), sentiment);
        }
        assert_eq!("Positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert!(matches!(
            "mixed".parse::<Sentiment>(),
            Err(Error::UnmappedLabel(_))
        ));
    }

    #[test]
    fn test_sentiment_serialization() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Negative).unwrap(),
            "\"negative\""
        );
    }
}
