//! Roast selection.
//!
//! A roast comes from the configured [`RoastGenerator`] when there is one,
//! and from the canned [`fallback`] pools otherwise or when generation fails.

pub mod fallback;
pub mod generator;
pub mod selector;

pub use generator::{ChatConfig, ChatRoastGenerator, RoastContext, RoastGenerator};
pub use selector::RoastSelector;
