use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the positivity workspace.
///
/// Failures are binary at the invocation level: a schema problem aborts the
/// whole run, while per-region missing data is never reported as an error.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PositivityError {
    /// A required field never appears in the input data.
    #[error("schema error: field `{field}` is absent from the input data")]
    Schema {
        /// Name of the missing field.
        field: String,
    },

    /// Invalid input argument (zero day counts, duplicate method names, ...).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the supplied data (duplicate observations, ragged rows, ...).
    #[error("data issue: {0}")]
    Data(String),

    /// Failure while writing an export.
    #[error("io error: {0}")]
    Io(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl PositivityError {
    /// Helper: build a `Schema` error for a missing field.
    pub fn schema(field: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
        }
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `Data` error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}

impl From<std::io::Error> for PositivityError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
