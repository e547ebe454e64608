//! Re-export of foundational types from `positivity-types`.
// Consolidated re-exports so downstream crates can depend on `positivity-core` only

pub use positivity_types::{
    DEFAULT_DIFF_DAYS, DEFAULT_RECENT_DAYS, FieldId, Method, MethodRegistry, PositivityConfig,
    PositivityError, ProvenanceTable, RegionId, RunSummary, TEST_POSITIVITY_METHODS,
    UnselectedReason, fields,
};
