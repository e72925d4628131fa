//! Analysis modules.
//!
//! Descriptive statistics and group-by aggregation over the survey dataset.

pub mod aggregator;
pub mod stats;

pub use aggregator::*;
