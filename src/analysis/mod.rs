//! Score analysis.
//!
//! Pure functions turning category scores into the composite score and
//! the burn/compliment bullet lists.

pub mod aggregator;

pub use aggregator::*;
