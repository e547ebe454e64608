//! Per-region selection outcomes produced by the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why a region received no selected method.
///
/// None of these are errors: regions without fresh data are expected and are
/// simply absent from the output series and provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum UnselectedReason {
    /// The region has raw observations but no method produced a single ratio.
    NoCandidates,
    /// The region's first observation is too late for any delta to land inside
    /// the recency window.
    InsufficientRange {
        /// Earliest raw observation for the region.
        first_observed: NaiveDate,
    },
    /// At least one method produced ratios, but none inside the recency window.
    Stale {
        /// Latest date with a non-missing ratio across all methods.
        last_value: NaiveDate,
    },
}

/// Summary counts for one run, suitable for logging and audit output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Regions with at least one input observation.
    pub regions: usize,
    /// Non-empty (region, method) candidate series.
    pub candidates: usize,
    /// Regions that received a selected method.
    pub selected: usize,
    /// Selected region count per method name, in registry order.
    pub by_method: Vec<(String, usize)>,
}
