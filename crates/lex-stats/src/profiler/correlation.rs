//! Pairwise Pearson correlation between numeric columns.

use crate::types::{ColumnType, CorrelationPair, Row, TypeMap};
use crate::utils::parse_numeric_cell;

/// Pairs whose |r| exceeds this are reported as highly correlated.
pub const HIGH_CORRELATION_THRESHOLD: f64 = 0.7;

/// Correlate every pair of numeric-labelled columns over `rows`.
///
/// Each pair uses only the rows where both cells parse as numbers. Pairs are
/// listed in column order (`a-b`, `a-c`, `b-c`). The coefficient is `None`
/// when fewer than two rows pair up or either side has no variance.
pub fn correlate_columns<S: AsRef<str>>(
    rows: &[Row],
    columns: &[S],
    type_map: &TypeMap,
) -> Vec<CorrelationPair> {
    let numeric: Vec<(&str, Vec<Option<f64>>)> = columns
        .iter()
        .map(|column| column.as_ref())
        .filter(|column| type_map.get(*column) == Some(&ColumnType::Numeric))
        .map(|column| {
            let cells = rows
                .iter()
                .map(|row| parse_numeric_cell(row.value_or_empty(column)))
                .collect();
            (column, cells)
        })
        .collect();

    let mut pairs = Vec::new();
    for (i, (left, left_cells)) in numeric.iter().enumerate() {
        for (right, right_cells) in &numeric[i + 1..] {
            let (xs, ys): (Vec<f64>, Vec<f64>) = left_cells
                .iter()
                .zip(right_cells)
                .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                .unzip();

            pairs.push(CorrelationPair {
                left: left.to_string(),
                right: right.to_string(),
                coefficient: pearson_correlation(&xs, &ys),
                paired_rows: xs.len(),
            });
        }
    }
    pairs
}

/// Pairs with a defined coefficient whose magnitude exceeds `threshold`.
pub fn high_correlations(pairs: &[CorrelationPair], threshold: f64) -> Vec<CorrelationPair> {
    pairs
        .iter()
        .filter(|pair| pair.coefficient.is_some_and(|r| r.abs() > threshold))
        .cloned()
        .collect()
}

/// Pearson's r for two equally long samples.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(columns: &[&str], values: &[&[&str]]) -> Vec<Row> {
        values
            .iter()
            .map(|cells| columns.iter().copied().zip(cells.iter().copied()).collect())
            .collect()
    }

    fn numeric_types(columns: &[&str]) -> TypeMap {
        columns
            .iter()
            .map(|c| (c.to_string(), ColumnType::Numeric))
            .collect()
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("defined coefficient");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    // ==================== pearson_correlation tests ====================

    #[test]
    fn test_perfect_positive_and_negative() {
        assert_close(pearson_correlation(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]), 1.0);
        assert_close(pearson_correlation(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0);
    }

    #[test]
    fn test_known_coefficient() {
        // r = 6 / sqrt(60)
        assert_close(
            pearson_correlation(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]),
            0.7745966692414834,
        );
    }

    #[test]
    fn test_undefined_coefficients() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), None);
        assert_eq!(pearson_correlation(&[], &[]), None);
        // constant side
        assert_eq!(pearson_correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), None);
    }

    // ==================== correlate_columns tests ====================

    #[test]
    fn test_pairs_in_column_order() {
        let columns = ["a", "b", "c"];
        let data = rows(&columns, &[&["1", "2", "9"], &["2", "4", "7"], &["3", "6", "1"]]);

        let pairs = correlate_columns(&data, &columns, &numeric_types(&columns));

        let names: Vec<(&str, &str)> = pairs
            .iter()
            .map(|p| (p.left.as_str(), p.right.as_str()))
            .collect();
        assert_eq!(names, vec![("a", "b"), ("a", "c"), ("b", "c")]);
        assert_close(pairs[0].coefficient, 1.0);
    }

    #[test]
    fn test_only_rows_where_both_cells_parse() {
        let columns = ["spend", "impressions"];
        let data = rows(
            &columns,
            &[
                &["1", "10"],
                &["n/a", "500"],
                &["2", ""],
                &["3", "30"],
                &["4", "40"],
            ],
        );

        let pairs = correlate_columns(&data, &columns, &numeric_types(&columns));

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].paired_rows, 3);
        assert_close(pairs[0].coefficient, 1.0);
    }

    #[test]
    fn test_categorical_columns_excluded() {
        let columns = ["page_id", "spend", "impressions"];
        let data = rows(&columns, &[&["P1", "1", "2"], &["P2", "2", "1"]]);
        let mut types = numeric_types(&columns);
        types.insert("page_id".to_string(), ColumnType::Categorical);

        let pairs = correlate_columns(&data, &columns, &types);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].left, "spend");
        assert_close(pairs[0].coefficient, -1.0);
    }

    #[test]
    fn test_single_numeric_column_has_no_pairs() {
        let columns = ["spend"];
        let data = rows(&columns, &[&["1"], &["2"]]);
        assert!(correlate_columns(&data, &columns, &numeric_types(&columns)).is_empty());
    }

    #[test]
    fn test_high_correlations_filter() {
        let pair = |right: &str, coefficient| CorrelationPair {
            left: "a".to_string(),
            right: right.to_string(),
            coefficient,
            paired_rows: 5,
        };
        let pairs = vec![
            pair("b", Some(0.95)),
            pair("c", Some(-0.71)),
            pair("d", Some(0.7)),
            pair("e", None),
        ];

        let high: Vec<String> = high_correlations(&pairs, HIGH_CORRELATION_THRESHOLD)
            .into_iter()
            .map(|p| p.right)
            .collect();
        assert_eq!(high, vec!["b", "c"]);
    }
}
