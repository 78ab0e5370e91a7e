//! Descriptive statistics for a single column.

use crate::types::{
    CategoricalSummary, ColumnStatistics, ColumnType, NumericMode, NumericSummary, ValueCount,
    ValueSummary,
};
use crate::utils::{is_present, parse_numeric_cell};
use indexmap::IndexMap;

/// Number of entries kept at each end of a categorical frequency ranking.
const RANKING_LENGTH: usize = 3;

/// Compute the statistics record for one column's raw values.
///
/// A numeric column whose non-empty values do not all parse falls back to the
/// categorical summary; this is not an error.
pub fn compute_column_statistics<S: AsRef<str>>(
    values: &[S],
    column_type: ColumnType,
) -> ColumnStatistics {
    let non_empty: Vec<&str> = values
        .iter()
        .map(AsRef::as_ref)
        .filter(|v| is_present(v))
        .collect();

    if non_empty.is_empty() {
        return ColumnStatistics::empty(values.len());
    }

    let summary = match column_type {
        ColumnType::Numeric => match parse_all(&non_empty) {
            Some(numbers) => numeric_summary(numbers).map(ValueSummary::Numeric),
            None => Some(ValueSummary::Categorical(categorical_summary(&non_empty))),
        },
        ColumnType::Categorical => Some(ValueSummary::Categorical(categorical_summary(&non_empty))),
    };

    ColumnStatistics {
        count: values.len(),
        non_empty_count: non_empty.len(),
        summary,
    }
}

/// Parse every value, or nothing at all.
fn parse_all(values: &[&str]) -> Option<Vec<f64>> {
    values.iter().map(|v| parse_numeric_cell(v)).collect()
}

/// Numeric summary of a set of values; `None` when there are no values.
///
/// Quartiles are read at indices `n / 4` and `3n / 4` of the sorted values
/// without interpolation, and the standard deviation divides by `n`.
pub fn numeric_summary(mut values: Vec<f64>) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(f64::total_cmp);
    let n = values.len();

    let (min, max) = (values[0], values[n - 1]);

    // summing identical inexact values drifts away from the value itself
    let (mean, std_dev) = if min == max {
        (min, 0.0)
    } else {
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, variance.sqrt())
    };
    let median = if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    };

    Some(NumericSummary {
        mean,
        min,
        max,
        median,
        q1: values[n / 4],
        q3: values[3 * n / 4],
        std_dev,
        mode: sorted_mode(&values),
    })
}

/// Longest run of equal values in a sorted slice; the earliest run wins ties.
fn sorted_mode(sorted: &[f64]) -> NumericMode {
    let mut best = NumericMode {
        value: sorted[0],
        frequency: 0,
    };
    let mut start = 0;

    while start < sorted.len() {
        let value = sorted[start];
        let run = sorted[start..].iter().take_while(|&&v| v == value).count().max(1);
        if run > best.frequency {
            best = NumericMode {
                value,
                frequency: run,
            };
        }
        start += run;
    }

    best
}

/// Frequency summary of non-empty values.
///
/// The ranking is ordered by descending frequency; equal frequencies keep the
/// order in which the values were first seen.
pub(crate) fn categorical_summary(values: &[&str]) -> CategoricalSummary {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(*value).or_insert(0) += 1;
    }

    let unique_count = counts.len();
    let mut ranking: Vec<(&str, usize)> = counts.into_iter().collect();
    // stable: ties stay in first-seen order
    ranking.sort_by(|a, b| b.1.cmp(&a.1));

    let to_counts = |entries: &[(&str, usize)]| -> Vec<ValueCount> {
        entries
            .iter()
            .map(|(value, frequency)| ValueCount::new(*value, *frequency))
            .collect()
    };

    let tail_start = ranking.len().saturating_sub(RANKING_LENGTH);
    CategoricalSummary {
        unique_count,
        most_common: to_counts(&ranking[..RANKING_LENGTH.min(ranking.len())]),
        least_common: to_counts(&ranking[tail_start..]),
    }
}
