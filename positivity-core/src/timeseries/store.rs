use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use chrono::NaiveDate;
use positivity_types::{FieldId, PositivityError, RegionId};
use serde::{Deserialize, Serialize};

/// One raw reading in long form: `(variable, region, date) -> value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongObservation {
    /// Field the reading belongs to.
    pub variable: FieldId,
    /// Region the reading belongs to.
    pub region: RegionId,
    /// Calendar date of the reading.
    pub date: NaiveDate,
    /// Reading value; `None` is an explicit missing value.
    pub value: Option<f64>,
}

impl LongObservation {
    /// Convenience constructor.
    pub fn new(
        variable: FieldId,
        region: RegionId,
        date: NaiveDate,
        value: impl Into<Option<f64>>,
    ) -> Self {
        Self {
            variable,
            region,
            date,
            value: value.into(),
        }
    }
}

type FieldSeries = BTreeMap<NaiveDate, f64>;

/// Immutable snapshot of per-region, per-field time series with provenance.
///
/// Behavior:
/// - Only present values are stored; missing readings are simply absent.
/// - Provenance is a free-form label per `(region, field)`, typically the
///   source or method that produced the series.
/// - Every accessor iterates in `(region, field, date)` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiRegionTimeseries {
    data: BTreeMap<RegionId, BTreeMap<FieldId, FieldSeries>>,
    provenance: BTreeMap<RegionId, BTreeMap<FieldId, String>>,
}

impl MultiRegionTimeseries {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            provenance: BTreeMap::new(),
        }
    }

    /// Build a store from long-form records plus a provenance mapping.
    ///
    /// Missing and NaN values are dropped rather than stored.
    ///
    /// # Errors
    /// Returns `Data` if two records share the same `(variable, region, date)`.
    pub fn from_timeseries_long<R, P>(records: R, provenance: P) -> Result<Self, PositivityError>
    where
        R: IntoIterator<Item = LongObservation>,
        P: IntoIterator<Item = ((RegionId, FieldId), String)>,
    {
        let mut store = Self::new();
        let mut seen_missing: BTreeSet<(FieldId, RegionId, NaiveDate)> = BTreeSet::new();
        for obs in records {
            let series = store
                .data
                .entry(obs.region.clone())
                .or_default()
                .entry(obs.variable.clone())
                .or_default();
            let duplicate = series.contains_key(&obs.date)
                || seen_missing.contains(&(obs.variable.clone(), obs.region.clone(), obs.date));
            if duplicate {
                return Err(PositivityError::data(format!(
                    "duplicate observation for {} in {} on {}",
                    obs.variable, obs.region, obs.date
                )));
            }
            match obs.value.filter(|v| !v.is_nan()) {
                Some(v) => {
                    series.insert(obs.date, v);
                }
                None => {
                    seen_missing.insert((obs.variable, obs.region, obs.date));
                }
            }
        }
        store.prune_empty();
        for ((region, field), label) in provenance {
            store
                .provenance
                .entry(region)
                .or_default()
                .insert(field, label);
        }
        Ok(store)
    }

    /// Flatten the stored series for `fields` into long-form records, sorted
    /// by `(variable, region, date)`.
    #[must_use]
    pub fn timeseries_long(&self, fields: &BTreeSet<FieldId>) -> Vec<LongObservation> {
        let mut out: Vec<LongObservation> = Vec::new();
        for field in fields {
            for (region, by_field) in &self.data {
                let Some(series) = by_field.get(field) else {
                    continue;
                };
                out.extend(series.iter().map(|(date, v)| LongObservation {
                    variable: field.clone(),
                    region: region.clone(),
                    date: *date,
                    value: Some(*v),
                }));
            }
        }
        out
    }

    /// Every field with at least one stored value.
    #[must_use]
    pub fn fields(&self) -> BTreeSet<FieldId> {
        self.data
            .values()
            .flat_map(|by_field| by_field.keys().cloned())
            .collect()
    }

    /// True if any region has a value for `field`.
    #[must_use]
    pub fn has_field(&self, field: &FieldId) -> bool {
        self.data.values().any(|by_field| by_field.contains_key(field))
    }

    /// Iterate regions with at least one stored value.
    pub fn regions(&self) -> impl Iterator<Item = &RegionId> {
        self.data.keys()
    }

    /// Stored series for `(region, field)`.
    #[must_use]
    pub fn series(&self, region: &RegionId, field: &FieldId) -> Option<&BTreeMap<NaiveDate, f64>> {
        self.data.get(region)?.get(field)
    }

    /// Stored value for `(region, field, date)`.
    #[must_use]
    pub fn value(&self, region: &RegionId, field: &FieldId, date: NaiveDate) -> Option<f64> {
        self.series(region, field)?.get(&date).copied()
    }

    /// Provenance label for `(region, field)`.
    #[must_use]
    pub fn provenance(&self, region: &RegionId, field: &FieldId) -> Option<&str> {
        self.provenance.get(region)?.get(field).map(String::as_str)
    }

    /// Total number of stored values.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.data
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy of the store restricted to `regions`; unknown regions are ignored.
    #[must_use]
    pub fn get_regions_subset<'a, I>(&self, regions: I) -> Self
    where
        I: IntoIterator<Item = &'a RegionId>,
    {
        let mut out = Self::new();
        for region in regions {
            if let Some(by_field) = self.data.get(region) {
                out.data.insert(region.clone(), by_field.clone());
            }
            if let Some(prov) = self.provenance.get(region) {
                out.provenance.insert(region.clone(), prov.clone());
            }
        }
        out
    }

    /// Combine two stores whose `(region, field)` series do not overlap, e.g.
    /// merging a derived series back into the raw store.
    ///
    /// # Errors
    /// Returns `Data` if both stores hold a series for the same `(region, field)`.
    pub fn join(mut self, other: Self) -> Result<Self, PositivityError> {
        for (region, by_field) in other.data {
            let target = self.data.entry(region.clone()).or_default();
            for (field, series) in by_field {
                match target.entry(field) {
                    Entry::Vacant(v) => {
                        v.insert(series);
                    }
                    Entry::Occupied(o) => {
                        return Err(PositivityError::data(format!(
                            "both stores hold {} for {region}",
                            o.key()
                        )));
                    }
                }
            }
        }
        for (region, prov) in other.provenance {
            self.provenance.entry(region).or_default().extend(prov);
        }
        Ok(self)
    }

    fn prune_empty(&mut self) {
        for by_field in self.data.values_mut() {
            by_field.retain(|_, series| !series.is_empty());
        }
        self.data.retain(|_, by_field| !by_field.is_empty());
    }
}
