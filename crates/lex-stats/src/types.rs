use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Input Types
// ============================================================================

/// One record of a dataset: column name to raw cell text, in header order.
///
/// An empty string is a present-but-missing value. A column that is not in
/// the row at all is a different condition (see [`crate::profiler::group_by_keys`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, String>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw cell for `column`, or `None` when the row has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Raw cell for `column`, treating an absent column as empty.
    pub fn value_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A loaded dataset: the header in file order plus every data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Type label derived for a column from a sample of its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Categorical,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column name to type label, in header order.
pub type TypeMap = IndexMap<String, ColumnType>;

// ============================================================================
// Statistics Records
// ============================================================================

/// Summary statistics for one column over one set of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Number of cells, including empty ones.
    pub count: usize,
    /// Number of cells that are non-empty after trimming.
    pub non_empty_count: usize,
    /// Absent when the column has no non-empty value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ValueSummary>,
}

impl ColumnStatistics {
    /// Record for a column with no usable value.
    pub fn empty(count: usize) -> Self {
        Self {
            count,
            non_empty_count: 0,
            summary: None,
        }
    }

    pub fn missing_count(&self) -> usize {
        self.count - self.non_empty_count
    }

    pub fn numeric(&self) -> Option<&NumericSummary> {
        match &self.summary {
            Some(ValueSummary::Numeric(summary)) => Some(summary),
            _ => None,
        }
    }

    pub fn categorical(&self) -> Option<&CategoricalSummary> {
        match &self.summary {
            Some(ValueSummary::Categorical(summary)) => Some(summary),
            _ => None,
        }
    }
}

/// Type-specific part of a [`ColumnStatistics`] record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Element at index `n / 4` of the sorted values.
    pub q1: f64,
    /// Element at index `3n / 4` of the sorted values.
    pub q3: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub mode: NumericMode,
}

/// Most frequent numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericMode {
    pub value: f64,
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub unique_count: usize,
    /// Up to three values, most frequent first.
    pub most_common: Vec<ValueCount>,
    /// Up to three values from the tail of the same ranking.
    pub least_common: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub frequency: usize,
}

impl ValueCount {
    pub fn new(value: impl Into<String>, frequency: usize) -> Self {
        Self {
            value: value.into(),
            frequency,
        }
    }
}

/// Column name to statistics record, in column order.
pub type DatasetStatistics = IndexMap<String, ColumnStatistics>;

// ============================================================================
// Grouping
// ============================================================================

/// Values of the grouping columns for one group, in key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(Vec<String>);

impl GroupKey {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for GroupKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Row count of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSize {
    pub key: GroupKey,
    pub rows: usize,
}

impl GroupSize {
    pub fn new(key: GroupKey, rows: usize) -> Self {
        Self { key, rows }
    }
}

/// Statistics for the rows of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStatistics {
    pub key: GroupKey,
    pub row_count: usize,
    pub statistics: DatasetStatistics,
}

// ============================================================================
// Profile Types
// ============================================================================

/// Result of grouping a dataset by one key list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingProfile {
    pub keys: Vec<String>,
    pub group_count: usize,
    /// Distribution of rows per group; `None` only for an empty dataset.
    pub group_size_summary: Option<NumericSummary>,
    pub largest_groups: Vec<GroupSize>,
    /// Detailed statistics for the leading groups, in discovery order.
    pub groups: Vec<GroupStatistics>,
    /// Groups past the detail limit, counted in sizes only.
    pub undetailed_groups: usize,
}

/// A configured grouping that could not run against this dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedGrouping {
    pub keys: Vec<String>,
    pub missing_columns: Vec<String>,
}

/// Pearson correlation between two numeric columns, over the rows where
/// both cells parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub left: String,
    pub right: String,
    /// `None` when fewer than two rows pair up or a side is constant
    pub coefficient: Option<f64>,
    pub paired_rows: usize,
}

/// Everything computed for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub column_types: TypeMap,
    pub overall: DatasetStatistics,
    /// Every pair of numeric columns, in column order
    pub correlations: Vec<CorrelationPair>,
    pub groupings: Vec<GroupingProfile>,
    pub skipped_groupings: Vec<SkippedGrouping>,
}

impl DatasetProfile {
    pub fn numeric_column_count(&self) -> usize {
        self.column_types
            .values()
            .filter(|t| **t == ColumnType::Numeric)
            .count()
    }

    pub fn categorical_column_count(&self) -> usize {
        self.column_types.len() - self.numeric_column_count()
    }
}

static_assertions::assert_impl_all!(Row: Send, Sync);
static_assertions::assert_impl_all!(ColumnStatistics: Send, Sync);
static_assertions::assert_impl_all!(GroupKey: Send, Sync);
static_assertions::assert_impl_all!(DatasetProfile: Send, Sync);
