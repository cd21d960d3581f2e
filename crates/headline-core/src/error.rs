//! Error types for the headline sentiment pipeline

use std::fmt;
use std::path::PathBuf;

/// Result type alias using the pipeline's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Collection,
    Classification,
    Filtering,
    Reporting,
    Visualization,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Collection => "collection",
            Self::Classification => "classification",
            Self::Filtering => "filtering",
            Self::Reporting => "reporting",
            Self::Visualization => "visualization",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type for pipeline operations
///
/// Every variant is fatal to a run; there is no local recovery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Forum API unreachable, or credentials missing/rejected
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The named channel does not exist
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    /// Classifier backend failure, before it is attributed to an input
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Classifier failure attributed to a specific post
    #[error("classification failed for post #{index} ({headline:?}): {reason}")]
    Classification {
        index: usize,
        headline: String,
        reason: String,
    },

    /// Raw classifier code with no entry in the label table
    #[error("unmapped classifier label: {0}")]
    UnmappedLabel(String),

    /// Report could not be written
    #[error("failed to write report {}: {reason}", path.display())]
    ReportWrite { path: PathBuf, reason: String },

    /// Chart could not be rendered to its output
    #[error("failed to render chart: {0}")]
    Render(String),

    /// Confidence threshold outside [0, 1]
    #[error("invalid confidence threshold {0}: must be within [0, 1]")]
    InvalidThreshold(f32),

    /// Unknown report format
    #[error("invalid report format {0:?}: expected csv or excel")]
    InvalidFormat(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new source-unavailable error
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Create a new channel-not-found error
    pub fn channel_not_found(channel: impl Into<String>) -> Self {
        Self::ChannelNotFound(channel.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Attribute a classifier failure to the post at `index`
    pub fn classification(index: usize, headline: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Classification {
            index,
            headline: headline.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new report write error
    pub fn report_write(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::ReportWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new chart render error
    pub fn render(reason: impl fmt::Display) -> Self {
        Self::Render(reason.to_string())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stage of the pipeline this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            Self::SourceUnavailable(_) | Self::ChannelNotFound(_) => Stage::Collection,
            Self::Classifier(_) | Self::Classification { .. } | Self::UnmappedLabel(_) => {
                Stage::Classification
            }
            Self::InvalidThreshold(_) => Stage::Filtering,
            Self::ReportWrite { .. } => Stage::Reporting,
            Self::Render(_) => Stage::Visualization,
            Self::InvalidFormat(_) | Self::Config(_) => Stage::Configuration,
        }
    }
}
