//! Grading modules.
//!
//! Weight normalization against the grading policy, and aggregation of
//! the normalized records into a grade summary.

pub mod aggregator;
pub mod normalizer;

pub use aggregator::summarize;
pub use normalizer::{normalize, set_weight, weight_totals, NormalizeError, WeightTotals};
