//! Error types for the esgboard aggregation pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`LoadError`] - CSV loading and schema errors
//! - [`AggregateError`] - Grouped-statistic errors
//! - [`ReshapeError`] - Melt/pivot errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every error is
//! fail-fast: a stage surfaces the error instead of producing a
//! partial or zero-filled table.

use thiserror::Error;

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while loading a CSV source into the record store.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the byte content.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Empty source.
    #[error("CSV source is empty")]
    Empty,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// Required columns absent from the header line.
    #[error("Missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A cell could not be coerced to its declared numeric type.
    #[error("Line {line}, column '{column}': cannot parse '{value}' as a number")]
    Parse {
        line: usize,
        column: String,
        value: String,
    },

    /// A coerced record failed schema validation.
    #[error("Line {}: invalid record: {}", .line, .errors.join("; "))]
    InvalidRecord { line: usize, errors: Vec<String> },
}

// =============================================================================
// Aggregation Errors
// =============================================================================

/// Errors while computing grouped statistics.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A referenced column does not exist in the table.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// An aggregate was requested on a non-numeric column.
    #[error("Column '{0}' is not numeric")]
    InvalidColumn(String),

    /// An aggregate was requested over zero rows.
    #[error("Cannot aggregate over an empty table")]
    EmptyPartition,
}

// =============================================================================
// Reshape Errors
// =============================================================================

/// Errors while reshaping tables (melt, pivot).
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// A referenced column does not exist in the table.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A pivot value cell is not numeric.
    #[error("Column '{0}' is not numeric")]
    InvalidColumn(String),

    /// Two input rows map the same matrix cell to different values.
    #[error("Ambiguous cell ({row}, {column}): {existing} vs {conflicting}")]
    AmbiguousCell {
        row: String,
        column: String,
        existing: f64,
        conflicting: f64,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by
/// [`crate::transform::pipeline::build_dashboard`]. It wraps all
/// lower-level errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV loading error.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Aggregation error.
    #[error("Aggregate error: {0}")]
    Aggregate(#[from] AggregateError),

    /// Reshape error.
    #[error("Reshape error: {0}")]
    Reshape(#[from] ReshapeError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for aggregation operations.
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Result type for reshape operations.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
