//! Report generation for the one-shot CLI mode.

pub mod generator;

pub use generator::*;
