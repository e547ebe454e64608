//! Positivity-specific identifiers, calculation methods and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod ids;
mod method;
mod provenance;
mod reports;

pub use config::{DEFAULT_DIFF_DAYS, DEFAULT_RECENT_DAYS, PositivityConfig};
pub use error::PositivityError;
pub use ids::{FieldId, RegionId, fields};
pub use method::{Method, MethodRegistry, TEST_POSITIVITY_METHODS};
pub use provenance::ProvenanceTable;
pub use reports::{RunSummary, UnselectedReason};
