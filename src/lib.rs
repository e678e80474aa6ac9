//! # esgboard - ESG portfolio aggregation pipeline
//!
//! esgboard transforms CSV datasets of financed companies (industry,
//! country, segment, financed amount, CO₂, water usage, climate-risk
//! scores) into deterministic, chart-ready aggregate tables for an
//! external presentation layer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│ Chart Specs │
//! │  (ISO/UTF8) │     │ (auto-enc)  │     │ (order/agg/ │     │  (JSON)     │
//! └─────────────┘     └─────────────┘     │  reshape)   │     └─────────────┘
//!                                         └─────────────┘
//! ```
//!
//! Data flows one way; every stage is a pure function returning a fresh
//! [`Table`], so re-running the pipeline over the same snapshot always
//! reproduces identical charts.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use esgboard::{build_dashboard, load_csv_file};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = load_csv_file("dataset.csv")?;
//!     let dashboard = build_dashboard(&table)?;
//!     println!("{} charts ready", dashboard.charts.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain vocabulary (Segment, Column registry)
//! - [`table`] - The immutable Table currency
//! - [`parser`] - CSV loading with auto-detection
//! - [`validation`] - Record schema validation
//! - [`transform`] - Ordering, aggregation, reshaping, pipeline
//! - [`logs`] - Leveled progress logging

// Core modules
pub mod error;
pub mod models;
pub mod table;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    AggregateError,
    AggregateResult,
    LoadError,
    LoadResult,
    PipelineError,
    PipelineResult,
    ReshapeError,
    ReshapeResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{columns_description, Column, Segment};

// =============================================================================
// Re-exports - Table
// =============================================================================

pub use table::{cell_key, cell_number, cell_str, number_value, Table};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    load_bytes,
    load_csv_file,
    load_str,
    parse_number,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, is_valid_record, validate, validate_record};

// =============================================================================
// Re-exports - Transform stages
// =============================================================================

pub use transform::aggregate::{count_by, mean_by, median_by, round_half_to_even, COUNT_COLUMN};
pub use transform::ordering::{computed_order, fixed_order, Aggregate, Direction, RANK_COLUMN};
pub use transform::reshape::{filter_by_segment, melt, pivot_matrix, RiskMatrix};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    build_dashboard,
    risk_matrix,
    risk_means,
    unordered_segment_count,
    ChartKind,
    ChartMeta,
    ChartSpec,
    Dashboard,
    AVERAGE_RISK_COLUMN,
    RISK_PRECISION,
    RISK_TYPE_COLUMN,
};

// =============================================================================
// Re-exports - Logging
// =============================================================================

pub use logs::{log_error, log_info, log_success, log_warning, LogEntry, LogLevel, LOG_SINK};
