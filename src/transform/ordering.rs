//! Categorical ordering of table columns.
//!
//! Two policies: a fixed, caller-supplied value sequence ([`fixed_order`],
//! used for the segment dimension) and an order computed from a per-group
//! statistic ([`computed_order`], used to rank industries by median CO₂
//! within a segment). Both are deterministic: the same input always yields
//! the same row set, ranks, and key sequence.

use crate::error::{AggregateError, AggregateResult};
use crate::table::{cell_key, cell_number, Table};
use crate::transform::aggregate::{mean, median};
use std::collections::BTreeMap;

/// Name of the rank column appended by [`fixed_order`].
pub const RANK_COLUMN: &str = "Rank";

/// Statistic applied per partition by [`computed_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Mean,
    Median,
}

/// Sort direction for [`computed_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Filter `table` to rows whose `column` value appears in `ordered_values`
/// and tag each kept row with a `Rank` column holding the value's index in
/// that sequence.
///
/// Rows whose value is outside the list are dropped, never repositioned.
/// Input row order is preserved; the rank is display metadata, not a
/// physical sort.
pub fn fixed_order(table: &Table, column: &str, ordered_values: &[&str]) -> Table {
    let mut columns: Vec<String> = table.columns().to_vec();
    if !columns.iter().any(|c| c == RANK_COLUMN) {
        columns.push(RANK_COLUMN.to_string());
    }
    let mut out = Table::new(columns);

    for row in table.rows() {
        let value = cell_key(row, column);
        if let Some(rank) = ordered_values.iter().position(|v| *v == value) {
            let mut tagged = row.clone();
            tagged.insert(RANK_COLUMN.to_string(), serde_json::Value::from(rank as u64));
            out.push_row(tagged);
        }
    }

    out
}

/// Partition `table` by `group_column`, apply `aggregate` to `value_column`
/// within each partition, and return the partition keys sorted by that
/// statistic in `direction`.
///
/// Ties in the statistic break by ascending lexical order of the key, so
/// the result is a total order independent of input row order. Fails with
/// `EmptyPartition` only when the table has zero rows; a single-row
/// partition has a well-defined median.
pub fn computed_order(
    table: &Table,
    group_column: &str,
    value_column: &str,
    aggregate: Aggregate,
    direction: Direction,
) -> AggregateResult<Vec<String>> {
    if !table.has_column(group_column) {
        return Err(AggregateError::MissingColumn(group_column.to_string()));
    }
    if !table.has_column(value_column) {
        return Err(AggregateError::MissingColumn(value_column.to_string()));
    }
    if table.is_empty() {
        return Err(AggregateError::EmptyPartition);
    }

    let mut partitions: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in table.rows() {
        let key = cell_key(row, group_column);
        let value = cell_number(row, value_column)
            .ok_or_else(|| AggregateError::InvalidColumn(value_column.to_string()))?;
        partitions.entry(key).or_default().push(value);
    }

    let mut entries: Vec<(String, f64)> = partitions
        .into_iter()
        .map(|(key, mut values)| {
            let stat = match aggregate {
                Aggregate::Mean => mean(&values),
                Aggregate::Median => median(&mut values),
            };
            (key, stat)
        })
        .collect();

    entries.sort_by(|a, b| {
        let by_stat = match direction {
            Direction::Ascending => a.1.total_cmp(&b.1),
            Direction::Descending => b.1.total_cmp(&a.1),
        };
        by_stat.then_with(|| a.0.cmp(&b.0))
    });

    Ok(entries.into_iter().map(|(key, _)| key).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segments() -> Table {
        Table::from_records(
            vec!["Segment".into(), "CO2 (tons)".into()],
            vec![
                json!({ "Segment": "Small Corporate", "CO2 (tons)": 10.0 }),
                json!({ "Segment": "Large Corporate", "CO2 (tons)": 100.0 }),
                json!({ "Segment": "Micro Corporate", "CO2 (tons)": 1.0 }),
                json!({ "Segment": "Large Corporate", "CO2 (tons)": 120.0 }),
            ],
        )
    }

    #[test]
    fn test_fixed_order_filters_and_ranks() {
        let order = ["Large Corporate", "Medium Corporate", "Small Corporate"];
        let ordered = fixed_order(&segments(), "Segment", &order);

        // "Micro Corporate" is out of the list and dropped
        assert_eq!(ordered.len(), 3);
        // Input row order preserved, ranks tag the list position
        assert_eq!(ordered.rows()[0]["Segment"], json!("Small Corporate"));
        assert_eq!(ordered.rows()[0]["Rank"], json!(2));
        assert_eq!(ordered.rows()[1]["Rank"], json!(0));
        assert_eq!(ordered.rows()[2]["Rank"], json!(0));
        assert!(ordered.has_column(RANK_COLUMN));
    }

    #[test]
    fn test_fixed_order_deterministic() {
        let order = ["Large Corporate", "Medium Corporate", "Small Corporate"];
        let first = fixed_order(&segments(), "Segment", &order);
        let second = fixed_order(&segments(), "Segment", &order);
        assert_eq!(first, second);
    }

    #[test]
    fn test_computed_order_descending_median() {
        let table = Table::from_records(
            vec!["Industry".into(), "CO2 (tons)".into()],
            vec![
                json!({ "Industry": "Textiles", "CO2 (tons)": 10.0 }),
                json!({ "Industry": "Steel", "CO2 (tons)": 100.0 }),
                json!({ "Industry": "Steel", "CO2 (tons)": 200.0 }),
                json!({ "Industry": "Cement", "CO2 (tons)": 80.0 }),
            ],
        );
        let order = computed_order(
            &table,
            "Industry",
            "CO2 (tons)",
            Aggregate::Median,
            Direction::Descending,
        )
        .unwrap();
        // Steel median 150, Cement 80, Textiles 10
        assert_eq!(order, vec!["Steel", "Cement", "Textiles"]);
    }

    #[test]
    fn test_computed_order_tie_breaks_lexically() {
        // Identical medians regardless of input row order
        let forward = Table::from_records(
            vec!["Industry".into(), "CO2 (tons)".into()],
            vec![
                json!({ "Industry": "Steel", "CO2 (tons)": 50.0 }),
                json!({ "Industry": "Cement", "CO2 (tons)": 50.0 }),
            ],
        );
        let backward = Table::from_records(
            vec!["Industry".into(), "CO2 (tons)".into()],
            vec![
                json!({ "Industry": "Cement", "CO2 (tons)": 50.0 }),
                json!({ "Industry": "Steel", "CO2 (tons)": 50.0 }),
            ],
        );

        for table in [forward, backward] {
            let order = computed_order(
                &table,
                "Industry",
                "CO2 (tons)",
                Aggregate::Median,
                Direction::Descending,
            )
            .unwrap();
            assert_eq!(order, vec!["Cement", "Steel"]);
        }
    }

    #[test]
    fn test_computed_order_empty_table() {
        let empty = Table::new(vec!["Industry".into(), "CO2 (tons)".into()]);
        let err = computed_order(
            &empty,
            "Industry",
            "CO2 (tons)",
            Aggregate::Median,
            Direction::Descending,
        )
        .unwrap_err();
        assert!(matches!(err, AggregateError::EmptyPartition));
    }

    #[test]
    fn test_computed_order_missing_column() {
        let err = computed_order(
            &segments(),
            "Sector",
            "CO2 (tons)",
            Aggregate::Median,
            Direction::Descending,
        )
        .unwrap_err();
        assert!(matches!(err, AggregateError::MissingColumn(c) if c == "Sector"));
    }

    #[test]
    fn test_computed_order_mean() {
        let order = computed_order(
            &segments(),
            "Segment",
            "CO2 (tons)",
            Aggregate::Mean,
            Direction::Ascending,
        )
        .unwrap();
        assert_eq!(order, vec!["Micro Corporate", "Small Corporate", "Large Corporate"]);
    }
}
