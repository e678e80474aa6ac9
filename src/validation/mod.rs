//! JSON Schema validation for coerced ESG records.
//!
//! Records are validated against an embedded JSON Schema (Draft 7) after
//! numeric coercion: required columns present, measure columns non-negative
//! numbers, risk columns numbers. Categorical columns accept any string;
//! an unrecognized `Segment` label is not a validation failure.
//!
//! The schema is embedded at compile time from `schemas/esg-record.json`.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use esgboard::validation::{is_valid_record, validate_record};
//!
//! let record = json!({
//!     "Industry": "Steel",
//!     "Country": "US",
//!     "Segment": "Large Corporate",
//!     "Financed Amount": 1000000.0,
//!     "CO2 (tons)": 100.0,
//!     "Water Usage (thousand m3)": 50.0,
//!     "Flood Risk": 1.0,
//!     "Water Stress": 2.0,
//!     "Drought Risk": 3.0
//! });
//! assert!(is_valid_record(&record));
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static RECORD_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/esg-record.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON object against a JSON schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with the violations otherwise
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Simpler variant: just true/false.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a coerced record against the embedded ESG record schema.
pub fn validate_record(data: &Value) -> Result<(), Vec<String>> {
    validate(&RECORD_SCHEMA, data)
}

/// Quick check against the embedded ESG record schema.
pub fn is_valid_record(data: &Value) -> bool {
    is_valid(&RECORD_SCHEMA, data)
}
