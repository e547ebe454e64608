//! Time-series utilities shared by the storage layer and the engine.
//!
//! Modules include:
//! - `axis`: contiguous calendar date ranges and trailing windows
//! - `table`: dense per-key matrices with explicit missing cells
//! - `store`: the multi-region storage snapshot and its long-form records
//! - `delta`: sparse-to-dense reshape and lagged differences of cumulative counters
/// Contiguous date axes.
pub mod axis;
/// Cumulative-to-delta conversion.
pub mod delta;
/// Multi-region storage snapshot.
pub mod store;
/// Dense wide tables.
pub mod table;
