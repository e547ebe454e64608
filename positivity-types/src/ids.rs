//! Identifier types for fields and regions.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed name of a raw or derived data column, e.g. `positive_tests`.
///
/// Standard field names are available as constants in [`fields`] so method
/// registries can be declared without allocating.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(Cow<'static, str>);

impl FieldId {
    /// Construct a field identifier from a static name.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Construct a field identifier from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the field name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for FieldId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for FieldId {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// Stable identifier of a geographic unit (state, county, ...).
///
/// Ordering is lexicographic on the identifier, which keeps every per-region
/// table in a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Construct a region identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RegionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Common field names used by the default method registry.
pub mod fields {
    use super::FieldId;

    /// Cumulative positive test results, any test type.
    pub const POSITIVE_TESTS: FieldId = FieldId::from_static("positive_tests");
    /// Cumulative positive viral test results.
    pub const POSITIVE_TESTS_VIRAL: FieldId = FieldId::from_static("positive_tests_viral");
    /// Cumulative people with a positive viral test.
    pub const POSITIVE_CASES_VIRAL: FieldId = FieldId::from_static("positive_cases_viral");
    /// Cumulative test results, any test type.
    pub const TOTAL_TESTS: FieldId = FieldId::from_static("total_tests");
    /// Cumulative viral test results.
    pub const TOTAL_TESTS_VIRAL: FieldId = FieldId::from_static("total_tests_viral");
    /// Cumulative people tested with a viral test.
    pub const TOTAL_TESTS_PEOPLE_VIRAL: FieldId = FieldId::from_static("total_tests_people_viral");
    /// Cumulative viral test encounters (one person tested once per day).
    pub const TOTAL_TEST_ENCOUNTERS_VIRAL: FieldId =
        FieldId::from_static("total_test_encounters_viral");
    /// Derived test positivity ratio produced by the engine.
    pub const POSITIVITY: FieldId = FieldId::from_static("positivity");
}
