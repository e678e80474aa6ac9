//! In-memory table of JSON-object rows.
//!
//! A [`Table`] is the currency of every pipeline stage: an ordered sequence
//! of rows sharing one column list. Stages never mutate the table they
//! receive; each stage builds and returns a fresh one. A table serializes
//! as `{ "columns": [...], "rows": [...] }`, which is exactly the shape the
//! presentation adapter consumes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An ordered table of rows sharing one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Build a table from JSON values, keeping only objects.
    pub fn from_records(columns: Vec<String>, records: Vec<Value>) -> Self {
        let rows = records
            .into_iter()
            .filter_map(|record| match record {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        Self { columns, rows }
    }

    /// Column names, in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, in input order.
    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has zero rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a column is part of the schema.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Map<String, Value>) {
        self.rows.push(row);
    }
}

/// Read a cell as a string slice.
pub fn cell_str<'a>(row: &'a Map<String, Value>, column: &str) -> Option<&'a str> {
    row.get(column).and_then(Value::as_str)
}

/// Read a cell as a number.
pub fn cell_number(row: &Map<String, Value>, column: &str) -> Option<f64> {
    row.get(column).and_then(Value::as_f64)
}

/// Render a cell for use in a group key: strings verbatim, anything else
/// via its JSON form.
pub fn cell_key(row: &Map<String, Value>, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Wrap a finite float as a JSON number.
pub fn number_value(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
