//! CSV record store with encoding and delimiter auto-detection.
//!
//! Loads a delimited ESG dataset into a [`Table`], validating the schema on
//! the way in: required columns must be present, measure and risk cells must
//! coerce to numbers, and every coerced record must satisfy the embedded
//! record schema. Categorical cells accept any string; unknown `Segment`
//! labels are retained (downstream segment-ordered views exclude them).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::models::Column;
use crate::table::{number_value, Table};
use crate::validation::validate_record;

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> LoadResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        _ => {
            // Fallback: UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Load a CSV file with auto-detection of encoding and delimiter.
pub fn load_csv_file<P: AsRef<Path>>(path: P) -> LoadResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    load_bytes(&bytes)
}

/// Load CSV bytes with auto-detection of encoding and delimiter.
pub fn load_bytes(bytes: &[u8]) -> LoadResult<Table> {
    if bytes.is_empty() {
        return Err(LoadError::Empty);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    load_str(&content, delimiter)
}

/// Load a CSV string with an explicit delimiter.
///
/// The first line is the header; required columns are checked there.
/// Each data line becomes one row object with numeric columns coerced,
/// validated against the embedded record schema. Empty lines are skipped.
pub fn load_str(content: &str, delimiter: char) -> LoadResult<Table> {
    let mut lines = content.lines();

    let header_line = lines.next().ok_or(LoadError::Empty)?;

    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|s| s.trim().trim_matches('"').to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::NoHeaders);
    }

    let missing: Vec<String> = Column::REQUIRED
        .iter()
        .map(|c| c.header().to_string())
        .filter(|required| !headers.iter().any(|h| h == required))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Schema { missing });
    }

    let mut table = Table::new(headers.clone());

    for (line_idx, line) in lines.enumerate() {
        let line_num = line_idx + 2; // +1 for 0-index, +1 for header

        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(delimiter).collect();
        let mut row = Map::new();

        for (i, header) in headers.iter().enumerate() {
            let raw = values
                .get(i)
                .map(|s| s.trim().trim_matches('"'))
                .unwrap_or("");

            let numeric = Column::from_header(header).map(|c| c.is_numeric()).unwrap_or(false);
            let cell = if numeric {
                let parsed = parse_number(raw).ok_or_else(|| LoadError::Parse {
                    line: line_num,
                    column: header.clone(),
                    value: raw.to_string(),
                })?;
                number_value(parsed)
            } else {
                Value::String(raw.to_string())
            };

            row.insert(header.clone(), cell);
        }

        validate_record(&Value::Object(row.clone())).map_err(|errors| {
            LoadError::InvalidRecord { line: line_num, errors }
        })?;

        table.push_row(row);
    }

    Ok(table)
}

static THOUSANDS_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d{1,3}(?:,\d{3})+(?:\.\d+)?$").expect("number pattern is valid")
});

static DECIMAL_COMMA_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+,\d+$").expect("number pattern is valid"));

/// Parse a numeric cell.
///
/// Accepts plain decimals, thousands-separated values ("1,234.5"), and
/// decimal-comma values ("3,5"). Spaces are treated as grouping and
/// removed. When both readings apply ("3,500"), thousands grouping wins.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_matches('"').replace(' ', "");
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if THOUSANDS_SHAPE.is_match(&cleaned) {
        cleaned.replace(',', "")
    } else if DECIMAL_COMMA_SHAPE.is_match(&cleaned) {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
