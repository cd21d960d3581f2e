//! Headline Core
//!
//! Types and errors shared by every stage of the headline sentiment pipeline.
//!
//! This crate provides:
//! - The post and classification data model
//! - Result tables and the confidence filter
//! - The error taxonomy, tagged with the failing pipeline stage

pub mod error;
pub mod types;

pub use error::{Error, Result, Stage};
pub use types::{newest_first, ClassificationResult, FilteredTable, Post, ResultTable, Sentiment};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result, Stage};
    pub use crate::types::{ClassificationResult, FilteredTable, Post, ResultTable, Sentiment};
}
