//! Transformation stages.
//!
//! This module holds the three pipeline stages downstream of the record
//! store, plus their composition:
//! - `ordering`: fixed and computed categorical orderings
//! - `aggregate`: counts, means, medians per group
//! - `reshape`: segment subsets, melt, pivot matrix
//! - `pipeline`: the full dashboard composition

pub mod aggregate;
pub mod ordering;
pub mod pipeline;
pub mod reshape;

pub use aggregate::{count_by, mean_by, median_by, round_half_to_even, COUNT_COLUMN};
pub use ordering::{computed_order, fixed_order, Aggregate, Direction, RANK_COLUMN};
pub use pipeline::*;
pub use reshape::{filter_by_segment, melt, pivot_matrix, RiskMatrix};
