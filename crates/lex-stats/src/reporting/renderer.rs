//! Renderer abstraction shared by every output format.

use super::report::AnalysisReport;
use crate::error::Result;
use crate::profiler::HIGH_CORRELATION_THRESHOLD;
use crate::types::{CorrelationPair, DatasetStatistics, GroupStatistics, GroupingProfile};
use serde::{Deserialize, Serialize};

/// Default number of groups rendered per grouping.
pub const DEFAULT_MAX_GROUPS_DISPLAYED: usize = 3;

/// Default number of columns rendered per group section.
pub const DEFAULT_MAX_COLUMNS_PER_GROUP: usize = 5;

/// Default decimal places for floating-point statistics.
pub const DEFAULT_FLOAT_PRECISION: usize = 3;

/// Title of the whole-dataset section.
pub const OVERALL_TITLE: &str = "OVERALL DATASET STATISTICS";

/// Presentation settings. These never change what is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub max_groups_displayed: usize,
    pub max_columns_per_group: usize,
    pub float_precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_groups_displayed: DEFAULT_MAX_GROUPS_DISPLAYED,
            max_columns_per_group: DEFAULT_MAX_COLUMNS_PER_GROUP,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

/// An output format for statistics sections.
///
/// Implementors receive one titled statistics map per call and decide how to
/// present it; they must handle both record variants and records without a
/// summary.
pub trait ReportRenderer {
    /// Render one section. With `column_limit` set, only that many leading
    /// columns are shown.
    fn render_section(
        &mut self,
        title: &str,
        stats: &DatasetStatistics,
        column_limit: Option<usize>,
    ) -> Result<()>;

    /// A free-standing line between sections, such as a group count.
    fn render_note(&mut self, _note: &str) -> Result<()> {
        Ok(())
    }
}

/// Drive `renderer` through a whole report: the overall section and its
/// correlation notes, then for each grouping its group count and the leading
/// group sections.
pub fn render_report<R: ReportRenderer + ?Sized>(
    renderer: &mut R,
    report: &AnalysisReport,
    options: &RenderOptions,
) -> Result<()> {
    renderer.render_section(OVERALL_TITLE, &report.overall, None)?;

    if !report.correlations.is_empty() {
        if report.high_correlations.is_empty() {
            renderer.render_note(&format!(
                "No highly correlated pairs found (|r| > {})",
                HIGH_CORRELATION_THRESHOLD
            ))?;
        }
        for pair in &report.high_correlations {
            renderer.render_note(&correlation_note(pair, options.float_precision))?;
        }
    }

    for grouping in &report.groupings {
        renderer.render_note(&group_count_note(grouping))?;

        for group in grouping.groups.iter().take(options.max_groups_displayed) {
            renderer.render_section(
                &group_title(&grouping.keys, group),
                &group.statistics,
                Some(options.max_columns_per_group),
            )?;
        }
    }

    for skipped in &report.skipped_groupings {
        renderer.render_note(&format!(
            "Skipped grouping by {}: missing columns {}",
            skipped.keys.join(", "),
            skipped.missing_columns.join(", ")
        ))?;
    }

    Ok(())
}

/// "Found 3 unique page_id groups" or "Found 4 unique (page_id, ad_id) combinations".
pub fn group_count_note(grouping: &GroupingProfile) -> String {
    match grouping.keys.as_slice() {
        [key] => format!("Found {} unique {} groups", grouping.group_count, key),
        keys => format!(
            "Found {} unique ({}) combinations",
            grouping.group_count,
            keys.join(", ")
        ),
    }
}

/// "High correlation: spend ~ impressions (r = 0.968, 7 rows)"
pub fn correlation_note(pair: &CorrelationPair, precision: usize) -> String {
    match pair.coefficient {
        Some(r) => format!(
            "High correlation: {} ~ {} (r = {:.*}, {} rows)",
            pair.left, pair.right, precision, r, pair.paired_rows
        ),
        None => format!(
            "No correlation defined: {} ~ {} ({} rows)",
            pair.left, pair.right, pair.paired_rows
        ),
    }
}

/// "PAGE_ID = P1, AD_ID = A1 (2 rows)"
pub fn group_title(keys: &[String], group: &GroupStatistics) -> String {
    let parts: Vec<String> = keys
        .iter()
        .zip(group.key.values())
        .map(|(key, value)| format!("{} = {}", key.to_uppercase(), value))
        .collect();
    format!("{} ({} rows)", parts.join(", "), group.row_count)
}
