//! Data profiling module for dataset analysis.
//!
//! This module provides the statistics engine:
//! - Type classification for columns from a leading sample
//! - Per-column descriptive statistics (numeric or categorical)
//! - Grouping of rows by key columns
//! - Pearson correlation between numeric columns
//! - Orchestration over a whole dataset and over every group
//!
//! Every function here is pure: it reads the rows it is given and returns a
//! freshly built result.

mod correlation;
mod grouping;
mod statistics;
mod type_inference;

use crate::config::AnalysisConfig;
use crate::types::{
    ColumnType, Dataset, DatasetProfile, DatasetStatistics, GroupKey, GroupStatistics,
    GroupingProfile, Row, SkippedGrouping, TypeMap,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

pub use correlation::{
    HIGH_CORRELATION_THRESHOLD, correlate_columns, high_correlations, pearson_correlation,
};
pub use grouping::{Groups, NULL_SENTINEL, group_by_keys, group_sizes, largest_groups};
pub use statistics::{compute_column_statistics, numeric_summary};

/// Classify every column as numeric or categorical from the first
/// `sample_size` rows.
pub fn classify_columns<S: AsRef<str>>(
    rows: &[Row],
    columns: &[S],
    sample_size: usize,
    threshold: f64,
) -> TypeMap {
    type_inference::classify_columns(rows, columns, sample_size, threshold)
}

/// Compute one statistics record per column over `rows`.
///
/// Cells missing from a row count as empty. Columns without a label in
/// `type_map` are treated as categorical. With `parallel` set, columns are
/// computed on the rayon pool; the result keeps `columns` order either way.
pub fn analyze_rows<'a, I, S>(
    rows: I,
    columns: &[S],
    type_map: &TypeMap,
    parallel: bool,
) -> DatasetStatistics
where
    I: IntoIterator<Item = &'a Row>,
    S: AsRef<str> + Sync,
{
    // single pass over the rows
    let mut column_values: Vec<Vec<&'a str>> = vec![Vec::new(); columns.len()];
    for row in rows {
        for (values, column) in column_values.iter_mut().zip(columns) {
            values.push(row.value_or_empty(column.as_ref()));
        }
    }

    let compute = |(column, values): (&S, &Vec<&str>)| {
        let column = column.as_ref();
        let column_type = type_map
            .get(column)
            .copied()
            .unwrap_or(ColumnType::Categorical);
        (
            column.to_string(),
            compute_column_statistics(values.as_slice(), column_type),
        )
    };

    if parallel {
        columns
            .par_iter()
            .zip(column_values.par_iter())
            .map(compute)
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    } else {
        columns.iter().zip(column_values.iter()).map(compute).collect()
    }
}

/// Data profiler running the full analysis described by an [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct DataProfiler {
    config: AnalysisConfig,
}

impl DataProfiler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Classify the dataset's columns with the configured sample window.
    pub fn classify(&self, dataset: &Dataset) -> TypeMap {
        classify_columns(
            &dataset.rows,
            &dataset.columns,
            self.config.sample_size,
            self.config.numeric_threshold,
        )
    }

    /// Statistics for an arbitrary subset of the dataset's rows.
    pub fn analyze<'a, I>(&self, rows: I, columns: &[String], type_map: &TypeMap) -> DatasetStatistics
    where
        I: IntoIterator<Item = &'a Row>,
    {
        analyze_rows(rows, columns, type_map, self.config.parallel)
    }

    /// Profile an entire dataset: classify once, analyze all rows, then every
    /// configured grouping with the same type map.
    pub fn profile_dataset(&self, dataset: &Dataset) -> DatasetProfile {
        info!(
            rows = dataset.height(),
            columns = dataset.width(),
            "Profiling dataset"
        );

        let column_types = self.classify(dataset);
        let numeric = column_types
            .values()
            .filter(|t| **t == ColumnType::Numeric)
            .count();
        info!("Detected {} numeric columns", numeric);

        let overall = self.analyze(&dataset.rows, &dataset.columns, &column_types);
        let correlations = correlate_columns(&dataset.rows, &dataset.columns, &column_types);
        debug!("Computed {} column correlations", correlations.len());

        let mut groupings = Vec::new();
        let mut skipped_groupings = Vec::new();

        for keys in &self.config.groupings {
            let missing_columns: Vec<String> = keys
                .iter()
                .filter(|key| !dataset.has_column(key))
                .cloned()
                .collect();

            if !missing_columns.is_empty() {
                warn!(
                    "Skipping grouping by {}: missing columns {:?}",
                    keys.join(" + "),
                    missing_columns
                );
                skipped_groupings.push(SkippedGrouping {
                    keys: keys.clone(),
                    missing_columns,
                });
                continue;
            }

            groupings.push(self.profile_grouping(dataset, keys, &column_types));
        }

        DatasetProfile {
            shape: (dataset.height(), dataset.width()),
            column_types,
            overall,
            correlations,
            groupings,
            skipped_groupings,
        }
    }

    /// Group the dataset by `keys` and analyze the leading groups.
    pub fn profile_grouping(
        &self,
        dataset: &Dataset,
        keys: &[String],
        type_map: &TypeMap,
    ) -> GroupingProfile {
        let groups = group_by_keys(&dataset.rows, keys);
        info!(
            "Found {} unique ({}) groups",
            groups.len(),
            keys.join(", ")
        );

        let sizes: Vec<f64> = groups.values().map(|rows| rows.len() as f64).collect();
        let groups_stats = self.analyze_groups(&groups, &dataset.columns, type_map);
        let undetailed_groups = groups.len() - groups_stats.len();
        if undetailed_groups > 0 {
            debug!(
                "{} groups beyond the first {} have sizes only",
                undetailed_groups, self.config.max_detailed_groups
            );
        }

        GroupingProfile {
            keys: keys.to_vec(),
            group_count: groups.len(),
            group_size_summary: numeric_summary(sizes),
            largest_groups: largest_groups(&groups, self.config.largest_groups_limit),
            groups: groups_stats,
            undetailed_groups,
        }
    }

    /// Analyze the first `max_detailed_groups` groups, in group order.
    pub fn analyze_groups(
        &self,
        groups: &Groups<'_>,
        columns: &[String],
        type_map: &TypeMap,
    ) -> Vec<GroupStatistics> {
        let detailed: Vec<_> = groups
            .iter()
            .take(self.config.max_detailed_groups)
            .collect();

        // groups run in parallel, so the columns inside each one do not
        let analyze_group = |(key, rows): (&GroupKey, &Vec<&Row>)| {
            debug!(group = %key, rows = rows.len(), "Analyzing group");
            GroupStatistics {
                key: key.clone(),
                row_count: rows.len(),
                statistics: analyze_rows(rows.iter().copied(), columns, type_map, false),
            }
        };

        if self.config.parallel {
            detailed.into_par_iter().map(analyze_group).collect()
        } else {
            detailed.into_iter().map(analyze_group).collect()
        }
    }
}

static_assertions::assert_impl_all!(DataProfiler: Send, Sync);
