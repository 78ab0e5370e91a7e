//! Plain-text rendering for terminals.

use super::renderer::{DEFAULT_FLOAT_PRECISION, ReportRenderer};
use crate::error::Result;
use crate::types::{ColumnStatistics, DatasetStatistics, ValueCount, ValueSummary};
use std::io::Write;

const BANNER_WIDTH: usize = 60;
const RULE_WIDTH: usize = 40;

/// Writes sections as banner-headed text blocks, one block per column.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    float_precision: usize,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }

    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_column(&mut self, column: &str, stats: &ColumnStatistics) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Column: {}", column)?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(self.out, "  count: {}", stats.count)?;
        writeln!(self.out, "  non_empty_count: {}", stats.non_empty_count)?;

        match &stats.summary {
            Some(ValueSummary::Numeric(summary)) => {
                let p = self.float_precision;
                for (name, value) in [
                    ("mean", summary.mean),
                    ("min", summary.min),
                    ("max", summary.max),
                    ("median", summary.median),
                    ("q1", summary.q1),
                    ("q3", summary.q3),
                    ("std_dev", summary.std_dev),
                ] {
                    writeln!(self.out, "  {}: {:.*}", name, p, value)?;
                }
                writeln!(
                    self.out,
                    "  mode: {} (appears {} times)",
                    summary.mode.value, summary.mode.frequency
                )?;
            }
            Some(ValueSummary::Categorical(summary)) => {
                writeln!(self.out, "  unique_count: {}", summary.unique_count)?;
                self.write_ranking("most_common", &summary.most_common)?;
                self.write_ranking("least_common", &summary.least_common)?;
            }
            None => {}
        }
        Ok(())
    }

    fn write_ranking(&mut self, name: &str, ranking: &[ValueCount]) -> Result<()> {
        writeln!(self.out, "  {}:", name)?;
        for entry in ranking {
            writeln!(self.out, "    '{}': {}", entry.value, entry.frequency)?;
        }
        Ok(())
    }
}

impl<W: Write> ReportRenderer for ConsoleRenderer<W> {
    fn render_section(
        &mut self,
        title: &str,
        stats: &DatasetStatistics,
        column_limit: Option<usize>,
    ) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(self.out, "{:^width$}", title, width = BANNER_WIDTH)?;
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))?;

        for (shown, (column, column_stats)) in stats.iter().enumerate() {
            if let Some(limit) = column_limit
                && shown >= limit
            {
                writeln!(self.out)?;
                writeln!(self.out, "... (showing first {} items)", limit)?;
                break;
            }
            self.write_column(column, column_stats)?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_note(&mut self, note: &str) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", note)?;
        Ok(())
    }
}
