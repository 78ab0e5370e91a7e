use crate::error::Result;
use crate::profiler::{HIGH_CORRELATION_THRESHOLD, high_correlations};
use crate::types::{
    CorrelationPair, DatasetProfile, DatasetStatistics, GroupingProfile, SkippedGrouping, TypeMap,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Report Types
// ============================================================================

/// Complete analysis of one dataset, ready for JSON output or rendering.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    // Metadata
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    pub row_count: usize,
    pub column_count: usize,

    // Classification
    pub column_types: TypeMap,
    pub numeric_columns: usize,
    pub categorical_columns: usize,

    /// Statistics over every row
    pub overall: DatasetStatistics,
    /// Columns with at least one missing cell, most missing first
    pub missing_values: Vec<MissingValueSummary>,

    // Correlation
    /// Pearson r for every pair of numeric columns
    pub correlations: Vec<CorrelationPair>,
    /// Pairs with |r| above [`HIGH_CORRELATION_THRESHOLD`]
    pub high_correlations: Vec<CorrelationPair>,

    pub groupings: Vec<GroupingProfile>,
    pub skipped_groupings: Vec<SkippedGrouping>,
}

/// Missing cells of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValueSummary {
    pub column: String,
    pub missing_count: usize,
    /// Share of rows, 0-100
    pub missing_percentage: f64,
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds [`AnalysisReport`]s and writes them to an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build a report from a finished dataset profile.
    pub fn build_report(input_file: &str, profile: DatasetProfile) -> AnalysisReport {
        let (row_count, column_count) = profile.shape;
        let numeric_columns = profile.numeric_column_count();
        let categorical_columns = profile.categorical_column_count();
        let missing_values = missing_value_summaries(&profile.overall, row_count);
        let high_correlations =
            high_correlations(&profile.correlations, HIGH_CORRELATION_THRESHOLD);

        AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            row_count,
            column_count,
            column_types: profile.column_types,
            numeric_columns,
            categorical_columns,
            overall: profile.overall,
            missing_values,
            correlations: profile.correlations,
            high_correlations,
            groupings: profile.groupings,
            skipped_groupings: profile.skipped_groupings,
        }
    }

    /// Write a report as pretty-printed JSON.
    ///
    /// For a `report_base_name` of "ads" the file is `ads_stats.json` inside
    /// the output directory, which is created when needed.
    pub fn write_report_to_file(
        &self,
        report: &AnalysisReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_stats.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

/// Missing-cell counts per column, largest first; equal counts keep column order.
fn missing_value_summaries(
    overall: &DatasetStatistics,
    row_count: usize,
) -> Vec<MissingValueSummary> {
    let mut summaries: Vec<MissingValueSummary> = overall
        .iter()
        .filter(|(_, stats)| stats.missing_count() > 0)
        .map(|(column, stats)| MissingValueSummary {
            column: column.clone(),
            missing_count: stats.missing_count(),
            missing_percentage: stats.missing_count() as f64 / row_count.max(1) as f64 * 100.0,
        })
        .collect();

    summaries.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
    summaries
}
