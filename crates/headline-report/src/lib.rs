//! Headline Report
//!
//! Output stages of the headline sentiment pipeline:
//! - [`ReportWriter`] persists a filtered table as CSV or an Excel workbook
//! - [`SentimentDistribution`] summarises label shares and renders them as a
//!   terminal bar chart

pub mod chart;
pub mod format;
pub mod writer;

pub use chart::{LabelShare, SentimentDistribution};
pub use format::ReportFormat;
pub use writer::{ReportWriter, HEADER, SHEET_NAME};
