//! positivity-core
//!
//! Core types and time-series utilities shared across the positivity workspace.
//!
//! - `types`: identifiers, methods, configuration and errors.
//! - `timeseries`: the multi-region storage snapshot, dense date-indexed
//!   tables, and the delta engine that turns cumulative counters into
//!   comparable period deltas.
//!
//! Everything here is synchronous and side-effect free: each function consumes
//! an immutable snapshot and returns new values.
#![warn(missing_docs)]

/// Time-series storage, dense tables and delta computation.
pub mod timeseries;
pub mod types;

pub use timeseries::axis::DateAxis;
pub use timeseries::delta::{DeltaTable, compute_deltas, diff_row, reshape};
pub use timeseries::store::{LongObservation, MultiRegionTimeseries};
pub use timeseries::table::{WideTable, is_all_missing, last_present, window_slice};
pub use types::*;
