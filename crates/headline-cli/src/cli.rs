use crate::pipeline::{validate_threshold, RunRequest};
use crate::settings::Settings;
use clap::Parser;
use headline_classifiers::ClassifierBackend;
use headline_report::ReportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "headline-sentiment")]
#[command(
    author,
    version,
    about = "Sentiment analysis of the newest headlines in a subreddit"
)]
pub struct Cli {
    /// Subreddit to analyze
    #[arg(long)]
    pub subreddit: String,

    /// Confidence threshold for sentiment filtering (0.0-1.0, inclusive)
    #[arg(
        long,
        alias = "confidence_threshold",
        default_value = "0.75",
        value_parser = parse_threshold
    )]
    pub confidence_threshold: f32,

    /// Print a bar chart of the sentiment distribution
    #[arg(long)]
    pub visualize: bool,

    /// Generate a report in the specified format: csv or excel
    #[arg(long, value_parser = parse_report_format)]
    pub report: Option<ReportFormat>,

    /// Report directory (overrides report_dir from the settings file)
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Classifier backend: local, remote or lexicon
    #[arg(long, value_parser = parse_backend)]
    pub classifier: Option<ClassifierBackend>,

    /// Settings file path
    #[arg(short, long, env = "HEADLINE_CONFIG", default_value = "headline.yaml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.report_dir {
            settings.report_dir = dir.clone();
        }
        if let Some(backend) = self.classifier {
            settings.classifier.backend = backend;
        }
    }

    pub fn run_request(&self, settings: &Settings) -> RunRequest {
        RunRequest {
            channel: self.subreddit.clone(),
            threshold: self.confidence_threshold,
            report: self.report,
            visualize: self.visualize,
            report_dir: settings.report_dir.clone(),
        }
    }
}

fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    validate_threshold(value).map_err(|e| e.to_string())
}

fn parse_report_format(s: &str) -> Result<ReportFormat, String> {
    s.parse().map_err(|e: headline_core::Error| e.to_string())
}

fn parse_backend(s: &str) -> Result<ClassifierBackend, String> {
    s.parse()
}
