//! Positivity computes test positivity per region from inconsistently
//! reported cumulative counters.
//!
//! Overview
//! - Several methods can compute positivity, each a numerator field over a
//!   denominator field. Registry order is priority.
//! - Cumulative counters become `diff_days` deltas on one shared, contiguous
//!   date axis; a delta is missing unless both readings exist.
//! - Every method is evaluated for every region. A zero denominator yields a
//!   missing ratio, never an infinity.
//! - Per region, the first method in registry order with any value in the
//!   trailing `recent_days` window is selected, and its full series becomes
//!   the region's `positivity` output with the method name as provenance.
//!
//! Key behaviors and trade-offs
//! - Exactly one method's raw ratios are used per region: no blending, no
//!   imputation, no clamping to `[0, 1]`.
//! - Regions without recent data are skipped, not failed; the run only fails
//!   when a required field is absent from the input entirely.
//! - Regions are independent. With the `parallel` feature the per-region work
//!   runs on a rayon pool; output is identical to the sequential path.
//!
//! Examples
//! ```
//! use chrono::NaiveDate;
//! use positivity::{
//!     FieldId, LongObservation, Method, MethodRegistry, MultiRegionTimeseries, Positivity,
//!     RegionId,
//! };
//!
//! let (cases, tests) = (FieldId::new("cases_cum"), FieldId::new("tests_cum"));
//! let tx = RegionId::new("48");
//! let mut records = Vec::new();
//! for day in 0..10u32 {
//!     let date = NaiveDate::from_ymd_opt(2020, 9, 1 + day).unwrap();
//!     let n = f64::from(day);
//!     records.push(LongObservation::new(cases.clone(), tx.clone(), date, 10.0 * n));
//!     records.push(LongObservation::new(tests.clone(), tx.clone(), date, 100.0 * n));
//! }
//! let store = MultiRegionTimeseries::from_timeseries_long(records, [])?;
//!
//! let engine = Positivity::builder()
//!     .methods(MethodRegistry::new(vec![Method::new("M1", cases, tests)])?)
//!     .diff_days(7)
//!     .build()?;
//! let result = engine.run(&store)?;
//! assert_eq!(result.provenance().get(&tx), Some("M1"));
//! # Ok::<(), positivity::PositivityError>(())
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod engine;

pub use core::{Positivity, PositivityBuilder, run};
pub use engine::assemble::{AllMethods, POSITIVITY, assemble};
pub use engine::export::{SIGNIFICANT_DIGITS, format_significant, write_csv};
pub use engine::ratio::{CandidateTable, evaluate_methods};
pub use engine::select::{RecencyWindow, Selection, SelectionTable, select_best};

// Re-export core types for convenience
pub use positivity_core::{
    DEFAULT_DIFF_DAYS, DEFAULT_RECENT_DAYS, DateAxis, DeltaTable, FieldId, LongObservation, Method,
    MethodRegistry, MultiRegionTimeseries, PositivityConfig, PositivityError, ProvenanceTable,
    RegionId, RunSummary, TEST_POSITIVITY_METHODS, UnselectedReason, WideTable, compute_deltas,
    fields,
};
