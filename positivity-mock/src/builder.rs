use std::ops::Range;

use chrono::{Days, NaiveDate};
use positivity_core::{FieldId, LongObservation, MultiRegionTimeseries, PositivityError, RegionId};

/// How a counter evolves over the days it reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Counter {
    /// `base + per_day * day`, where `day` counts from the builder start.
    Linear {
        /// Value on the builder start date.
        base: f64,
        /// Daily increment.
        per_day: f64,
    },
    /// Explicit values from the first reported day onward; `None` skips a day.
    Values(Vec<Option<f64>>),
}

impl Counter {
    /// Linear counter starting at zero.
    #[must_use]
    pub const fn linear(per_day: f64) -> Self {
        Self::Linear { base: 0.0, per_day }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    region: RegionId,
    field: FieldId,
    days: Range<usize>,
    counter: Counter,
}

/// Programmatic builder for deterministic cumulative-counter stores.
///
/// Every rule describes one `(region, field)` series over a day range
/// relative to `start`; `build` flattens the rules into long-form records and
/// hands them to [`MultiRegionTimeseries::from_timeseries_long`].
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    start: NaiveDate,
    days: usize,
    rules: Vec<Rule>,
    provenance: Vec<((RegionId, FieldId), String)>,
}

impl StoreBuilder {
    /// Builder for `days` consecutive dates beginning at `start`.
    #[must_use]
    pub const fn new(start: NaiveDate, days: usize) -> Self {
        Self {
            start,
            days,
            rules: Vec::new(),
            provenance: Vec::new(),
        }
    }

    /// Number of dates covered by full-range counters.
    #[must_use]
    pub const fn days(&self) -> usize {
        self.days
    }

    /// Date at `day` days after the start.
    #[must_use]
    pub fn date(&self, day: usize) -> Option<NaiveDate> {
        self.start
            .checked_add_days(Days::new(u64::try_from(day).ok()?))
    }

    /// Report `counter` for `(region, field)` on every date.
    #[must_use]
    pub fn counter(self, region: &str, field: &FieldId, counter: Counter) -> Self {
        let days = 0..self.days;
        self.counter_between(region, field, days, counter)
    }

    /// Report `counter` for `(region, field)` only on the days in `days`.
    #[must_use]
    pub fn counter_between(
        mut self,
        region: &str,
        field: &FieldId,
        days: Range<usize>,
        counter: Counter,
    ) -> Self {
        self.rules.push(Rule {
            region: RegionId::new(region),
            field: field.clone(),
            days,
            counter,
        });
        self
    }

    /// Attach a provenance label to `(region, field)`.
    #[must_use]
    pub fn provenance(mut self, region: &str, field: &FieldId, label: impl Into<String>) -> Self {
        self.provenance
            .push(((RegionId::new(region), field.clone()), label.into()));
        self
    }

    /// Long-form records for every rule, in rule order.
    #[must_use]
    pub fn records(&self) -> Vec<LongObservation> {
        let mut out = Vec::new();
        for rule in &self.rules {
            for (offset, day) in rule.days.clone().enumerate() {
                let value = match &rule.counter {
                    Counter::Linear { base, per_day } => {
                        u32::try_from(day).ok().map(|d| base + per_day * f64::from(d))
                    }
                    Counter::Values(values) => values.get(offset).copied().flatten(),
                };
                if let (Some(date), Some(value)) = (self.date(day), value) {
                    out.push(LongObservation::new(
                        rule.field.clone(),
                        rule.region.clone(),
                        date,
                        value,
                    ));
                }
            }
        }
        out
    }

    /// Build the store.
    ///
    /// # Errors
    /// Returns `Data` if two rules report the same `(region, field, date)`.
    pub fn build(self) -> Result<MultiRegionTimeseries, PositivityError> {
        let records = self.records();
        MultiRegionTimeseries::from_timeseries_long(records, self.provenance)
    }
}
