//! Helpers shared across the crate.
//!
//! - Statistical functions, such as Pearson correlation.

mod stats;

pub use stats::*;
