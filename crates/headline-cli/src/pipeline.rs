//! Collect, classify, filter, report, visualize

use headline_classifiers::SentimentAdapter;
use headline_core::{ClassificationResult, Error, Post, Result, ResultTable};
use headline_report::{ReportFormat, ReportWriter, SentimentDistribution};
use headline_source::{normalize_channel, PostSource};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default inclusive confidence bound
pub const DEFAULT_THRESHOLD: f32 = 0.75;

/// One pipeline invocation
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub channel: String,
    pub threshold: f32,
    pub report: Option<ReportFormat>,
    pub visualize: bool,
    pub report_dir: PathBuf,
}

impl RunRequest {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            threshold: DEFAULT_THRESHOLD,
            report: None,
            visualize: false,
            report_dir: PathBuf::from("reports"),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Posts retrieved from the channel
    pub fetched: usize,
    /// Results that passed the confidence filter
    pub kept: usize,
    pub report_path: Option<PathBuf>,
    pub distribution: Option<SentimentDistribution>,
}

/// Reject thresholds outside `[0, 1]`, including NaN
pub fn validate_threshold(threshold: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}

/// Sequential headline sentiment pipeline.
///
/// Any stage failure aborts the run; nothing is written or drawn unless every
/// post was classified.
pub struct Pipeline {
    source: Box<dyn PostSource>,
    classifier: SentimentAdapter,
}

impl Pipeline {
    pub fn new(source: Box<dyn PostSource>, classifier: SentimentAdapter) -> Self {
        Self { source, classifier }
    }

    /// Run every stage for `request`, drawing the chart (if requested) to `chart_out`
    pub async fn run<W: Write>(&self, request: &RunRequest, chart_out: &mut W) -> Result<RunSummary> {
        let threshold = validate_threshold(request.threshold)?;
        let channel = normalize_channel(&request.channel);

        let posts = self.source.fetch(channel).await?;
        let table = self.classify_all(&posts).await?;

        info!(
            "Filtering headlines based on input confidence threshold of {}...",
            threshold
        );
        let filtered = table.filter(threshold);
        info!("{} of {} headlines kept", filtered.len(), table.len());

        let report_path = match request.report {
            Some(format) => {
                let writer = ReportWriter::new(&request.report_dir);
                Some(writer.write(&filtered, channel, format)?)
            }
            None => None,
        };

        let distribution = if request.visualize {
            let distribution = SentimentDistribution::from_results(&filtered);
            distribution.render(chart_out)?;
            Some(distribution)
        } else {
            None
        };

        Ok(RunSummary {
            fetched: posts.len(),
            kept: filtered.len(),
            report_path,
            distribution,
        })
    }

    /// Classify every post in order; the first failure aborts.
    ///
    /// Backend errors are attributed to the failing post's zero-based index.
    pub async fn classify_all(&self, posts: &[Post]) -> Result<ResultTable> {
        info!(
            "Running sentiment analysis pipeline with {}...",
            self.classifier.name()
        );

        let mut results = Vec::with_capacity(posts.len());
        for (index, post) in posts.iter().enumerate() {
            let score = self
                .classifier
                .classify(&post.text)
                .await
                .map_err(|e| match e {
                    Error::Classifier(reason) => Error::classification(index, &post.text, reason),
                    other => other,
                })?;

            debug!(index, label = %score.label, confidence = score.confidence, "{}", post.text);
            results.push(ClassificationResult::new(post, score.label, score.confidence));
        }

        Ok(ResultTable::new(results))
    }
}
