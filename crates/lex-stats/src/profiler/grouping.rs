//! Partitioning rows by the values of key columns.

use crate::types::{GroupKey, GroupSize, Row};
use indexmap::IndexMap;

/// Key value used for a grouping column the row does not have at all.
///
/// A column that is present with an empty value keeps the empty string.
pub const NULL_SENTINEL: &str = "NULL";

/// Groups in first-occurrence order, each holding its rows in input order.
pub type Groups<'a> = IndexMap<GroupKey, Vec<&'a Row>>;

/// Partition `rows` by the values of the `keys` columns.
///
/// Every row ends up in exactly one group. Groups are ordered by the first
/// row that produced their key.
pub fn group_by_keys<'a, S: AsRef<str>>(rows: &'a [Row], keys: &[S]) -> Groups<'a> {
    let mut groups: Groups<'a> = IndexMap::new();

    for row in rows {
        let key: GroupKey = keys
            .iter()
            .map(|k| row.get(k.as_ref()).unwrap_or(NULL_SENTINEL))
            .collect();
        groups.entry(key).or_default().push(row);
    }

    groups
}

/// Number of rows in each group, in group order.
pub fn group_sizes(groups: &Groups<'_>) -> Vec<GroupSize> {
    groups
        .iter()
        .map(|(key, rows)| GroupSize::new(key.clone(), rows.len()))
        .collect()
}

/// The `limit` largest groups by row count, largest first.
///
/// Equal sizes keep group discovery order.
pub fn largest_groups(groups: &Groups<'_>, limit: usize) -> Vec<GroupSize> {
    let mut sizes = group_sizes(groups);
    sizes.sort_by(|a, b| b.rows.cmp(&a.rows));
    sizes.truncate(limit);
    sizes
}
