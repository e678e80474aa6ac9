//! Grouped statistics: counts, means, medians.
//!
//! Every aggregate partitions its input by one or more categorical columns
//! and emits one output row per distinct observed key, in ascending
//! lexicographic key order. Combinations absent from the input never
//! appear: downstream bar charts show only observed combinations.

use serde_json::Map;
use std::collections::BTreeMap;

use crate::error::{AggregateError, AggregateResult};
use crate::table::{cell_key, cell_number, number_value, Table};

/// Name of the count column appended by [`count_by`].
pub const COUNT_COLUMN: &str = "Count";

/// Count rows per distinct combination of `group_columns`.
///
/// Output columns are `group_columns` + `"Count"`. An empty input yields
/// an empty count table: counting nothing is well-defined.
pub fn count_by(table: &Table, group_columns: &[&str]) -> AggregateResult<Table> {
    check_columns(table, group_columns)?;

    let mut groups: BTreeMap<Vec<String>, (Vec<serde_json::Value>, u64)> = BTreeMap::new();

    for row in table.rows() {
        let key: Vec<String> = group_columns.iter().map(|c| cell_key(row, c)).collect();
        let entry = groups.entry(key).or_insert_with(|| {
            let values = group_columns
                .iter()
                .map(|c| row.get(*c).cloned().unwrap_or(serde_json::Value::Null))
                .collect();
            (values, 0)
        });
        entry.1 += 1;
    }

    let mut columns: Vec<String> = group_columns.iter().map(|c| c.to_string()).collect();
    columns.push(COUNT_COLUMN.to_string());
    let mut out = Table::new(columns);

    for (_, (values, count)) in groups {
        let mut row = Map::new();
        for (column, value) in group_columns.iter().zip(values) {
            row.insert(column.to_string(), value);
        }
        row.insert(COUNT_COLUMN.to_string(), serde_json::Value::from(count));
        out.push_row(row);
    }

    Ok(out)
}

/// Arithmetic mean of each value column per distinct `group_column` value,
/// rounded half-to-even at `precision` decimal places.
pub fn mean_by(
    table: &Table,
    group_column: &str,
    value_columns: &[&str],
    precision: u32,
) -> AggregateResult<Table> {
    check_columns(table, &[group_column])?;
    check_columns(table, value_columns)?;
    if table.is_empty() {
        return Err(AggregateError::EmptyPartition);
    }

    let mut groups: BTreeMap<String, (serde_json::Value, Vec<f64>, u64)> = BTreeMap::new();

    for row in table.rows() {
        let key = cell_key(row, group_column);
        let entry = groups.entry(key).or_insert_with(|| {
            let value = row
                .get(group_column)
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            (value, vec![0.0; value_columns.len()], 0)
        });
        for (i, column) in value_columns.iter().enumerate() {
            let v = cell_number(row, column)
                .ok_or_else(|| AggregateError::InvalidColumn(column.to_string()))?;
            entry.1[i] += v;
        }
        entry.2 += 1;
    }

    let mut columns = vec![group_column.to_string()];
    columns.extend(value_columns.iter().map(|c| c.to_string()));
    let mut out = Table::new(columns);

    for (_, (value, sums, count)) in groups {
        let mut row = Map::new();
        row.insert(group_column.to_string(), value);
        for (column, sum) in value_columns.iter().zip(sums) {
            let mean = round_half_to_even(sum / count as f64, precision);
            row.insert(column.to_string(), number_value(mean));
        }
        out.push_row(row);
    }

    Ok(out)
}

/// Median of `value_column` per distinct combination of `group_columns`.
///
/// The median of an even-sized partition is the mean of its two central
/// values; a single-row partition has a well-defined median.
pub fn median_by(
    table: &Table,
    group_columns: &[&str],
    value_column: &str,
) -> AggregateResult<Table> {
    check_columns(table, group_columns)?;
    check_columns(table, &[value_column])?;
    if table.is_empty() {
        return Err(AggregateError::EmptyPartition);
    }

    let mut groups: BTreeMap<Vec<String>, (Vec<serde_json::Value>, Vec<f64>)> = BTreeMap::new();

    for row in table.rows() {
        let key: Vec<String> = group_columns.iter().map(|c| cell_key(row, c)).collect();
        let entry = groups.entry(key).or_insert_with(|| {
            let values = group_columns
                .iter()
                .map(|c| row.get(*c).cloned().unwrap_or(serde_json::Value::Null))
                .collect();
            (values, Vec::new())
        });
        let v = cell_number(row, value_column)
            .ok_or_else(|| AggregateError::InvalidColumn(value_column.to_string()))?;
        entry.1.push(v);
    }

    let mut columns: Vec<String> = group_columns.iter().map(|c| c.to_string()).collect();
    columns.push(value_column.to_string());
    let mut out = Table::new(columns);

    for (_, (values, mut samples)) in groups {
        let mut row = Map::new();
        for (column, value) in group_columns.iter().zip(values) {
            row.insert(column.to_string(), value);
        }
        row.insert(value_column.to_string(), number_value(median(&mut samples)));
        out.push_row(row);
    }

    Ok(out)
}

fn check_columns(table: &Table, columns: &[&str]) -> AggregateResult<()> {
    for column in columns {
        if !table.has_column(column) {
            return Err(AggregateError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// Arithmetic mean. Callers guarantee a non-empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median: middle of the sorted values, or the mean of the two central
/// values for an even count. Callers guarantee a non-empty slice.
pub(crate) fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Round to `precision` decimal places, ties to the even neighbor.
pub fn round_half_to_even(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    let floor = scaled.floor();
    let rounded = if (scaled - floor - 0.5).abs() < 1e-9 {
        if (floor as i64) % 2 == 0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };
    rounded / factor
}
