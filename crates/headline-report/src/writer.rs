//! Timestamped report files

use crate::format::ReportFormat;
use chrono::{DateTime, Local};
use headline_core::{ClassificationResult, Error, FilteredTable, Result};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Report column order
pub const HEADER: [&str; 4] = ["headline", "sentiment", "score", "url"];

/// Worksheet name of the Excel report
pub const SHEET_NAME: &str = "Sentiment Analysis";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Writes filtered tables under a report directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `table` as `<dir>/<channel>_sentiment_report_<timestamp>.<ext>`.
    ///
    /// The directory is created if missing. An empty table yields a
    /// header-only file.
    pub fn write(
        &self,
        table: &FilteredTable,
        channel: &str,
        format: ReportFormat,
    ) -> Result<PathBuf> {
        self.write_at(table, channel, format, Local::now())
    }

    /// [`write`](Self::write) with an explicit timestamp
    pub fn write_at(
        &self,
        table: &FilteredTable,
        channel: &str,
        format: ReportFormat,
        at: DateTime<Local>,
    ) -> Result<PathBuf> {
        let path = self.report_path(channel, format, at);

        std::fs::create_dir_all(&self.dir).map_err(|e| Error::report_write(&path, e))?;

        match format {
            ReportFormat::Csv => write_csv(table, &path),
            ReportFormat::Excel => write_xlsx(table, &path),
        }
        .map_err(|reason| Error::report_write(&path, reason))?;

        info!("Report generated at {}", path.display());
        Ok(path)
    }

    /// Report file path for `channel` at `at`
    pub fn report_path(&self, channel: &str, format: ReportFormat, at: DateTime<Local>) -> PathBuf {
        self.dir.join(format!(
            "{}_sentiment_report_{}.{}",
            file_stem(channel),
            at.format(TIMESTAMP_FORMAT),
            format.extension()
        ))
    }
}

/// Channel name made safe for use in a file name
fn file_stem(channel: &str) -> String {
    channel
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn write_csv(table: &FilteredTable, path: &Path) -> std::result::Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;

    writer.write_record(HEADER).map_err(|e| e.to_string())?;
    for result in table {
        let score = result.confidence.to_string();
        writer
            .write_record([
                result.text.as_str(),
                result.label.as_str(),
                score.as_str(),
                result.link.as_str(),
            ])
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}

fn write_xlsx(table: &FilteredTable, path: &Path) -> std::result::Result<(), String> {
    let mut workbook = Workbook::new();
    fill_sheet(&mut workbook, table).map_err(|e| e.to_string())?;
    workbook.save(path).map_err(|e| e.to_string())
}

fn fill_sheet(workbook: &mut Workbook, table: &FilteredTable) -> std::result::Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (i, result) in table.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, &result.text)?;
        worksheet.write_string(row, 1, result.label.as_str())?;
        worksheet.write_number(row, 2, spreadsheet_score(result))?;
        worksheet.write_string(row, 3, &result.link)?;
    }

    worksheet.set_column_width(0, 80.0)?;
    worksheet.set_column_width(3, 60.0)?;
    Ok(())
}

/// Widen through the shortest decimal form so 0.9f32 lands as 0.9, not 0.8999999761
fn spreadsheet_score(result: &ClassificationResult) -> f64 {
    result
        .confidence
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(result.confidence))
}
