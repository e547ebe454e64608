//! Provenance of selected positivity series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::RegionId;

/// Which method produced each region's output series.
///
/// Behavior:
/// - Built by the selector, one entry per region that received a selection.
/// - A region without an entry had no method with recent data.
/// - Labels are method names, suitable for audit and export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvenanceTable {
    entries: BTreeMap<RegionId, String>,
}

impl ProvenanceTable {
    /// Create an empty provenance table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Record the method selected for `region`, replacing any earlier entry.
    pub fn insert(&mut self, region: RegionId, method: impl Into<String>) {
        self.entries.insert(region, method.into());
    }

    /// Method name selected for `region`, if any.
    #[must_use]
    pub fn get(&self, region: &RegionId) -> Option<&str> {
        self.entries.get(region).map(String::as_str)
    }

    /// Iterate `(region, method)` pairs in region order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &str)> {
        self.entries.iter().map(|(r, m)| (r, m.as_str()))
    }

    /// Number of regions with a selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no region received a selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(RegionId, String)> for ProvenanceTable {
    fn from_iter<I: IntoIterator<Item = (RegionId, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
