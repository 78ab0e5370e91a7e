//! Column type classification from a leading sample of rows.

use crate::types::{ColumnType, Row, TypeMap};
use crate::utils::{is_numeric_cell, is_present};
use tracing::debug;

/// Classify every column as numeric or categorical.
///
/// Only the first `sample_size` rows are inspected. A column is numeric when
/// it has at least one non-empty sampled cell and the share of numeric cells
/// among the non-empty ones is strictly greater than `threshold`.
pub(crate) fn classify_columns<S: AsRef<str>>(
    rows: &[Row],
    columns: &[S],
    sample_size: usize,
    threshold: f64,
) -> TypeMap {
    let sample = &rows[..sample_size.min(rows.len())];

    columns
        .iter()
        .map(|column| {
            let column = column.as_ref();
            (
                column.to_string(),
                classify_column(sample, column, threshold),
            )
        })
        .collect()
}

/// Classify a single column over an already-sliced sample.
pub(crate) fn classify_column(sample: &[Row], column: &str, threshold: f64) -> ColumnType {
    let mut non_empty = 0usize;
    let mut numeric = 0usize;

    for row in sample {
        let cell = row.value_or_empty(column);
        if !is_present(cell) {
            continue;
        }
        non_empty += 1;
        if is_numeric_cell(cell) {
            numeric += 1;
        }
    }

    let column_type = if non_empty > 0 && numeric as f64 / non_empty as f64 > threshold {
        ColumnType::Numeric
    } else {
        ColumnType::Categorical
    };

    debug!(
        column,
        numeric, non_empty, %column_type, "Classified column"
    );

    column_type
}
