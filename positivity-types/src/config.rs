//! Configuration for a test positivity run.

use serde::{Deserialize, Serialize};

use crate::error::PositivityError;
use crate::method::MethodRegistry;

/// Default lag, in days, between the two cumulative readings of a delta.
pub const DEFAULT_DIFF_DAYS: usize = 7;
/// Default length, in days, of the trailing recency window.
pub const DEFAULT_RECENT_DAYS: usize = 14;

/// Parameters of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositivityConfig {
    /// Candidate methods in priority order.
    pub methods: MethodRegistry,
    /// Lag used to turn cumulative counters into period deltas.
    pub diff_days: usize,
    /// Trailing window in which a method must have data to be selectable.
    pub recent_days: usize,
}

impl PositivityConfig {
    /// Check that both day counts are positive.
    ///
    /// # Errors
    /// Returns `InvalidArg` naming the first zero-valued parameter.
    pub fn validate(&self) -> Result<(), PositivityError> {
        if self.diff_days == 0 {
            return Err(PositivityError::invalid_arg("diff_days must be positive"));
        }
        if self.recent_days == 0 {
            return Err(PositivityError::invalid_arg("recent_days must be positive"));
        }
        Ok(())
    }
}

impl Default for PositivityConfig {
    fn default() -> Self {
        Self {
            methods: MethodRegistry::default(),
            diff_days: DEFAULT_DIFF_DAYS,
            recent_days: DEFAULT_RECENT_DAYS,
        }
    }
}
