//! Table reshaping: segment subsets, wide-to-long melt, long-to-wide pivot.
//!
//! The melt and pivot operations are inverses over tables without duplicate
//! (row, column) cells; both exist because the two downstream heatmap
//! shapes want different inputs (long rows vs a 2-D grid).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ReshapeError, ReshapeResult};
use crate::models::{Column, Segment};
use crate::table::{cell_key, cell_number, cell_str, Table};

/// Rows whose `Segment` cell names the given segment, input order preserved.
///
/// Matching goes through [`Segment::from_label`], so unrecognized labels
/// never match any segment.
pub fn filter_by_segment(table: &Table, segment: Segment) -> Table {
    let mut out = Table::new(table.columns().to_vec());
    for row in table.rows() {
        let label = cell_str(row, Column::Segment.header()).unwrap_or("");
        if Segment::from_label(label) == Some(segment) {
            out.push_row(row.clone());
        }
    }
    out
}

/// Wide-to-long transform.
///
/// For each input row and each column in `value_columns`, emits one output
/// row `{id_columns..., var_name: column, value_name: cell}`. Output row
/// count is input rows × value columns.
pub fn melt(
    table: &Table,
    id_columns: &[&str],
    value_columns: &[&str],
    var_name: &str,
    value_name: &str,
) -> ReshapeResult<Table> {
    for column in id_columns.iter().chain(value_columns) {
        if !table.has_column(column) {
            return Err(ReshapeError::MissingColumn(column.to_string()));
        }
    }

    let mut columns: Vec<String> = id_columns.iter().map(|c| c.to_string()).collect();
    columns.push(var_name.to_string());
    columns.push(value_name.to_string());
    let mut out = Table::new(columns);

    for row in table.rows() {
        for value_column in value_columns {
            let mut melted = Map::new();
            for id in id_columns {
                melted.insert(
                    id.to_string(),
                    row.get(*id).cloned().unwrap_or(Value::Null),
                );
            }
            melted.insert(var_name.to_string(), Value::String(value_column.to_string()));
            melted.insert(
                value_name.to_string(),
                row.get(*value_column).cloned().unwrap_or(Value::Null),
            );
            out.push_row(melted);
        }
    }

    Ok(out)
}

// =============================================================================
// Risk Matrix
// =============================================================================

/// A 2-D value grid: row labels × column labels.
///
/// Cells are `None` when the (row, column) pair never occurred in the
/// source table; they serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMatrix {
    /// Row labels (countries), in first-appearance order.
    pub rows: Vec<String>,
    /// Column labels (risk types), in first-appearance order.
    pub columns: Vec<String>,
    /// Cell values, `values[row][column]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl RiskMatrix {
    /// Look up a cell by its labels.
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|l| l == row)?;
        let c = self.columns.iter().position(|l| l == column)?;
        self.values[r][c]
    }
}

/// Long-to-wide transform restricted to one numeric value column.
///
/// Builds a matrix where `matrix[r][c]` is the unique value of `value_key`
/// in the rows with `row_key = r` and `column_key = c`. Two rows mapping
/// the same cell to differing values is an error; an equal duplicate is
/// tolerated.
pub fn pivot_matrix(
    table: &Table,
    row_key: &str,
    column_key: &str,
    value_key: &str,
) -> ReshapeResult<RiskMatrix> {
    for column in [row_key, column_key, value_key] {
        if !table.has_column(column) {
            return Err(ReshapeError::MissingColumn(column.to_string()));
        }
    }

    let mut rows: Vec<String> = Vec::new();
    let mut columns: Vec<String> = Vec::new();
    for row in table.rows() {
        let r = cell_key(row, row_key);
        let c = cell_key(row, column_key);
        if !rows.contains(&r) {
            rows.push(r);
        }
        if !columns.contains(&c) {
            columns.push(c);
        }
    }

    let mut values = vec![vec![None; columns.len()]; rows.len()];

    for row in table.rows() {
        let r = cell_key(row, row_key);
        let c = cell_key(row, column_key);
        let v = cell_number(row, value_key)
            .ok_or_else(|| ReshapeError::InvalidColumn(value_key.to_string()))?;

        // Label positions exist from the first pass
        let ri = rows.iter().position(|l| *l == r).unwrap_or_default();
        let ci = columns.iter().position(|l| *l == c).unwrap_or_default();

        match values[ri][ci] {
            Some(existing) if existing != v => {
                return Err(ReshapeError::AmbiguousCell {
                    row: r,
                    column: c,
                    existing,
                    conflicting: v,
                });
            }
            _ => values[ri][ci] = Some(v),
        }
    }

    Ok(RiskMatrix { rows, columns, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn esg_rows() -> Table {
        Table::from_records(
            vec!["Industry".into(), "Segment".into(), "CO2 (tons)".into()],
            vec![
                json!({ "Industry": "Steel", "Segment": "Large Corporate", "CO2 (tons)": 100.0 }),
                json!({ "Industry": "Textiles", "Segment": "Small Corporate", "CO2 (tons)": 10.0 }),
                json!({ "Industry": "Cement", "Segment": "Large Corporate", "CO2 (tons)": 80.0 }),
                json!({ "Industry": "Retail", "Segment": "Micro Corporate", "CO2 (tons)": 5.0 }),
            ],
        )
    }

    #[test]
    fn test_filter_by_segment_exclusive() {
        let table = esg_rows();
        let large = filter_by_segment(&table, Segment::LargeCorporate);

        assert_eq!(large.len(), 2);
        for row in large.rows() {
            assert_eq!(cell_str(row, "Segment"), Some("Large Corporate"));
        }
        // Input order preserved
        assert_eq!(large.rows()[0]["Industry"], json!("Steel"));
        assert_eq!(large.rows()[1]["Industry"], json!("Cement"));
    }

    #[test]
    fn test_filter_by_segment_partition_bound() {
        let table = esg_rows();
        let total: usize = Segment::ordered()
            .into_iter()
            .map(|s| filter_by_segment(&table, s).len())
            .sum();
        // One row carries an unrecognized segment, so the three recognized
        // subsets cover strictly less than the whole table.
        assert_eq!(total, table.len() - 1);
    }

    #[test]
    fn test_melt_shape() {
        let table = Table::from_records(
            vec!["Country".into(), "Flood Risk".into(), "Water Stress".into()],
            vec![
                json!({ "Country": "US", "Flood Risk": 1.0, "Water Stress": 2.0 }),
                json!({ "Country": "DE", "Flood Risk": 3.0, "Water Stress": 4.0 }),
            ],
        );
        let melted = melt(
            &table,
            &["Country"],
            &["Flood Risk", "Water Stress"],
            "Risk Type",
            "Average Risk",
        )
        .unwrap();

        assert_eq!(melted.columns(), &["Country", "Risk Type", "Average Risk"]);
        assert_eq!(melted.len(), 4);
        assert_eq!(melted.rows()[0]["Country"], json!("US"));
        assert_eq!(melted.rows()[0]["Risk Type"], json!("Flood Risk"));
        assert_eq!(melted.rows()[0]["Average Risk"], json!(1.0));
        assert_eq!(melted.rows()[3]["Country"], json!("DE"));
        assert_eq!(melted.rows()[3]["Risk Type"], json!("Water Stress"));
        assert_eq!(melted.rows()[3]["Average Risk"], json!(4.0));
    }

    #[test]
    fn test_melt_missing_column() {
        let table = esg_rows();
        let err = melt(&table, &["Country"], &["CO2 (tons)"], "k", "v").unwrap_err();
        assert!(matches!(err, ReshapeError::MissingColumn(c) if c == "Country"));
    }

    #[test]
    fn test_pivot_matrix_basic() {
        let table = Table::from_records(
            vec!["Country".into(), "Risk Type".into(), "Average Risk".into()],
            vec![
                json!({ "Country": "US", "Risk Type": "Flood Risk", "Average Risk": 1.5 }),
                json!({ "Country": "US", "Risk Type": "Drought Risk", "Average Risk": 2.5 }),
                json!({ "Country": "DE", "Risk Type": "Flood Risk", "Average Risk": 0.5 }),
            ],
        );
        let matrix = pivot_matrix(&table, "Country", "Risk Type", "Average Risk").unwrap();

        assert_eq!(matrix.rows, vec!["US", "DE"]);
        assert_eq!(matrix.columns, vec!["Flood Risk", "Drought Risk"]);
        assert_eq!(matrix.get("US", "Drought Risk"), Some(2.5));
        assert_eq!(matrix.get("DE", "Flood Risk"), Some(0.5));
        // Never-observed pair stays empty
        assert_eq!(matrix.get("DE", "Drought Risk"), None);
    }

    #[test]
    fn test_pivot_matrix_ambiguous_cell() {
        let table = Table::from_records(
            vec!["Country".into(), "Risk Type".into(), "Average Risk".into()],
            vec![
                json!({ "Country": "US", "Risk Type": "Flood Risk", "Average Risk": 1.5 }),
                json!({ "Country": "US", "Risk Type": "Flood Risk", "Average Risk": 2.0 }),
            ],
        );
        let err = pivot_matrix(&table, "Country", "Risk Type", "Average Risk").unwrap_err();
        assert!(matches!(err, ReshapeError::AmbiguousCell { .. }));
    }

    #[test]
    fn test_pivot_matrix_equal_duplicate_tolerated() {
        let table = Table::from_records(
            vec!["Country".into(), "Risk Type".into(), "Average Risk".into()],
            vec![
                json!({ "Country": "US", "Risk Type": "Flood Risk", "Average Risk": 1.5 }),
                json!({ "Country": "US", "Risk Type": "Flood Risk", "Average Risk": 1.5 }),
            ],
        );
        let matrix = pivot_matrix(&table, "Country", "Risk Type", "Average Risk").unwrap();
        assert_eq!(matrix.get("US", "Flood Risk"), Some(1.5));
    }

    #[test]
    fn test_melt_pivot_round_trip() {
        // A wide aggregate table survives melt → pivot unchanged
        let wide = Table::from_records(
            vec!["Country".into(), "Flood Risk".into(), "Water Stress".into()],
            vec![
                json!({ "Country": "US", "Flood Risk": 1.25, "Water Stress": 2.5 }),
                json!({ "Country": "DE", "Flood Risk": 0.75, "Water Stress": 1.0 }),
            ],
        );
        let melted = melt(
            &wide,
            &["Country"],
            &["Flood Risk", "Water Stress"],
            "Risk Type",
            "Average Risk",
        )
        .unwrap();
        let matrix = pivot_matrix(&melted, "Country", "Risk Type", "Average Risk").unwrap();

        assert_eq!(matrix.rows, vec!["US", "DE"]);
        assert_eq!(matrix.columns, vec!["Flood Risk", "Water Stress"]);
        for row in wide.rows() {
            let country = cell_str(row, "Country").unwrap();
            for risk in ["Flood Risk", "Water Stress"] {
                assert_eq!(matrix.get(country, risk), cell_number(row, risk));
            }
        }
    }
}
