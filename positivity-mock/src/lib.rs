//! Deterministic inputs for positivity tests and demos.
//!
//! - [`StoreBuilder`] assembles stores from per-series counter rules.
//! - [`fixtures`] holds ready-made stores with known expected selections.

mod builder;
pub mod fixtures;

pub use builder::{Counter, StoreBuilder};
