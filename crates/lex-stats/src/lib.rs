//! Grouped Descriptive Statistics Library
//!
//! Descriptive statistics for tabular CSV datasets, computed for the dataset
//! as a whole and for every group defined by one or more key columns.
//!
//! # Overview
//!
//! - **Type Classification**: each column is labelled numeric or categorical
//!   from a leading sample of rows
//! - **Column Statistics**: mean, quartiles, standard deviation and mode for
//!   numeric columns; value frequencies for categorical ones
//! - **Grouping**: exact-match partitioning by key columns, in first-seen order
//! - **Correlation**: Pearson r between numeric columns, with highly
//!   correlated pairs called out
//! - **Reporting**: console sections and JSON reports over the same results
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_stats::{AnalysisConfig, analyze_file};
//! use lex_stats::reporting::{ConsoleRenderer, RenderOptions, render_report};
//!
//! let config = AnalysisConfig::builder()
//!     .grouping(["page_id"])
//!     .grouping(["page_id", "ad_id"])
//!     .sample_size(100)
//!     .numeric_threshold(0.8)
//!     .build()?;
//!
//! let report = analyze_file("data/ads.csv", &config)?;
//!
//! let mut console = ConsoleRenderer::new(std::io::stdout().lock());
//! render_report(&mut console, &report, &RenderOptions::default())?;
//! ```
//!
//! # Lower-level API
//!
//! The profiler functions work on any row slice and never fail:
//!
//! ```rust,ignore
//! use lex_stats::profiler::{analyze_rows, classify_columns, group_by_keys};
//!
//! let types = classify_columns(&dataset.rows, &dataset.columns, 100, 0.8);
//! let overall = analyze_rows(&dataset.rows, &dataset.columns, &types, true);
//!
//! for (key, rows) in group_by_keys(&dataset.rows, &["page_id"]) {
//!     let stats = analyze_rows(rows, &dataset.columns, &types, false);
//!     println!("{}: {} columns", key, stats.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

use std::path::Path;

// Re-exports for convenient access
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{Result as StatsResult, ResultExt, StatsError};
pub use loader::load_csv;
pub use profiler::DataProfiler;
pub use reporting::{
    AnalysisReport, ConsoleRenderer, JsonRenderer, MissingValueSummary, RenderOptions,
    ReportGenerator, ReportRenderer, render_report,
};
pub use types::{
    CategoricalSummary, ColumnStatistics, ColumnType, CorrelationPair, Dataset, DatasetProfile,
    DatasetStatistics, GroupKey, GroupSize, GroupStatistics, GroupingProfile, NumericMode,
    NumericSummary, Row, SkippedGrouping, TypeMap, ValueCount, ValueSummary,
};

/// Profile an already-loaded dataset and wrap the result in a report.
pub fn analyze_dataset(
    dataset: &Dataset,
    config: &AnalysisConfig,
    input_file: &str,
) -> AnalysisReport {
    let profile = DataProfiler::new(config.clone()).profile_dataset(dataset);
    ReportGenerator::build_report(input_file, profile)
}

/// Load a CSV file and analyze it.
pub fn analyze_file(path: impl AsRef<Path>, config: &AnalysisConfig) -> StatsResult<AnalysisReport> {
    let path = path.as_ref();
    config
        .validate()
        .map_err(|e| StatsError::InvalidConfig(e.to_string()))?;

    let dataset = load_csv(path)?;
    Ok(analyze_dataset(
        &dataset,
        config,
        &path.display().to_string(),
    ))
}
