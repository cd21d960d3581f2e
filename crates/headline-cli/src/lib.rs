//! Headline Sentiment CLI
//!
//! Wires a [`PostSource`](headline_source::PostSource) and a
//! [`SentimentAdapter`](headline_classifiers::SentimentAdapter) into the
//! sequential [`Pipeline`]: collect, classify, filter, then optionally
//! report and visualize.

pub mod cli;
pub mod pipeline;
pub mod settings;

pub use pipeline::{validate_threshold, Pipeline, RunRequest, RunSummary, DEFAULT_THRESHOLD};
pub use settings::Settings;
