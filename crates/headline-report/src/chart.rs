//! Label distribution and terminal bar chart

use headline_core::{Error, FilteredTable, Result, Sentiment};
use std::io::Write;
use tracing::info;

const BAR_WIDTH: usize = 40;
const Y_CAPTION: &str = "Percentage with confidence threshold filter";

/// Share of one label among the filtered results
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelShare {
    pub label: Sentiment,
    pub count: usize,
    pub percent: f64,
}

/// Relative frequency of each label present in a filtered table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentDistribution {
    total: usize,
    shares: Vec<LabelShare>,
}

impl SentimentDistribution {
    /// Count labels in `table`, most frequent first.
    ///
    /// Labels that never occur are omitted; an empty table gives an empty
    /// distribution.
    pub fn from_results(table: &FilteredTable) -> Self {
        let total = table.len();
        if total == 0 {
            return Self::default();
        }

        let mut shares: Vec<LabelShare> = Sentiment::ALL
            .iter()
            .filter_map(|&label| {
                let count = table.iter().filter(|r| r.label == label).count();
                (count > 0).then(|| LabelShare {
                    label,
                    count,
                    percent: count as f64 / total as f64 * 100.0,
                })
            })
            .collect();

        // Stable, so ties keep Sentiment::ALL order.
        shares.sort_by(|a, b| b.count.cmp(&a.count));

        Self { total, shares }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn shares(&self) -> &[LabelShare] {
        &self.shares
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Percentage for `label`, if present
    pub fn percent(&self, label: Sentiment) -> Option<f64> {
        self.shares
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.percent)
    }

    /// Log the shares and draw a horizontal bar chart to `out`
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        info!("Value counts of sentiment classes:");
        for share in &self.shares {
            info!("  {:<8} {:.1}%", share.label.as_str(), share.percent);
        }

        self.draw(out).map_err(Error::render)
    }

    fn draw<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Sentiment distribution ({} headlines)", self.total)?;
        writeln!(out, "{}", Y_CAPTION)?;

        if self.shares.is_empty() {
            writeln!(out, "  (no results above the confidence threshold)")?;
            return out.flush();
        }

        for share in &self.shares {
            let filled = (share.percent / 100.0 * BAR_WIDTH as f64).round() as usize;
            writeln!(
                out,
                "  {:<8} |{}{}| {:>5.1}%",
                share.label.as_str(),
                "#".repeat(filled),
                " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                share.percent
            )?;
        }
        out.flush()
    }
}
