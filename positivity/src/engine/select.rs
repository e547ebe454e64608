use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use positivity_core::{
    DateAxis, MethodRegistry, PositivityError, ProvenanceTable, RegionId, UnselectedReason,
    last_present, window_slice,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use super::ratio::CandidateTable;

/// Trailing dates in which a method must report to be selectable.
///
/// The window ends at the last date of the candidate axis and is clipped to
/// the axis start when the axis is shorter than the requested length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecencyWindow {
    dates: DateAxis,
    truncated: bool,
}

impl RecencyWindow {
    /// The last `recent_days` dates of `axis`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `recent_days` is zero.
    pub fn trailing(axis: &DateAxis, recent_days: usize) -> Result<Self, PositivityError> {
        let dates = axis
            .trailing(recent_days)
            .ok_or_else(|| PositivityError::invalid_arg("recent_days must be positive"))?;
        Ok(Self {
            dates,
            truncated: dates.len() < recent_days,
        })
    }

    /// Dates covered by the window.
    #[must_use]
    pub const fn dates(&self) -> &DateAxis {
        &self.dates
    }

    /// First date of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.dates.start()
    }

    /// Last date of the window, which is also the last date of the data.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.dates.end()
    }

    /// True when the data began inside the requested window, so fewer than
    /// `recent_days` dates are covered.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// The series chosen for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    method: String,
    series: Vec<Option<f64>>,
}

impl Selection {
    /// Name of the winning method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Full candidate series of the winning method, on the candidate axis.
    #[must_use]
    pub fn series(&self) -> &[Option<f64>] {
        &self.series
    }
}

/// Per-region selection outcome.
///
/// Every region seen by the selector appears exactly once, either with a
/// [`Selection`] or with the [`UnselectedReason`] it was passed over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionTable {
    axis: DateAxis,
    selected: BTreeMap<RegionId, Selection>,
    unselected: BTreeMap<RegionId, UnselectedReason>,
}

impl SelectionTable {
    /// Axis of every selected series.
    #[must_use]
    pub const fn axis(&self) -> &DateAxis {
        &self.axis
    }

    /// Selection for `region`.
    #[must_use]
    pub fn get(&self, region: &RegionId) -> Option<&Selection> {
        self.selected.get(region)
    }

    /// Why `region` received no selection.
    #[must_use]
    pub fn reason(&self, region: &RegionId) -> Option<UnselectedReason> {
        self.unselected.get(region).copied()
    }

    /// Iterate selected regions in order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &Selection)> {
        self.selected.iter()
    }

    /// Iterate regions without a selection and their reasons.
    pub fn unselected(&self) -> impl Iterator<Item = (&RegionId, UnselectedReason)> {
        self.unselected.iter().map(|(r, why)| (r, *why))
    }

    /// Number of selected regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when no region received a selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Record a reason for every region in `first_observed` the selector never
    /// saw, i.e. regions with raw data but no candidate row.
    ///
    /// A region whose first reading is less than `diff_days` before the window
    /// end cannot have produced any delta up to that date; it is reported as
    /// [`UnselectedReason::InsufficientRange`]. Others are
    /// [`UnselectedReason::NoCandidates`].
    pub fn classify_unselected<I>(
        &mut self,
        first_observed: I,
        window: &RecencyWindow,
        diff_days: usize,
    )
    where
        I: IntoIterator<Item = (RegionId, NaiveDate)>,
    {
        let lag = u64::try_from(diff_days).unwrap_or(u64::MAX);
        for (region, first) in first_observed {
            if self.selected.contains_key(&region) || self.unselected.contains_key(&region) {
                continue;
            }
            let earliest_delta = first.checked_add_days(Days::new(lag));
            let reason = match earliest_delta {
                Some(d) if d <= window.end() => UnselectedReason::NoCandidates,
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "positivity::select",
                        region = %region,
                        first_observed = %first,
                        window_end = %window.end(),
                        diff_days,
                        "region data starts too late for any delta in the recency window"
                    );
                    UnselectedReason::InsufficientRange {
                        first_observed: first,
                    }
                }
            };
            self.unselected.insert(region, reason);
        }
    }
}

type Outcome = Result<Selection, UnselectedReason>;

/// Pick, per region, the highest-priority method with a value in the window.
///
/// Behavior:
/// - A `(region, method)` row is recent-viable when any cell inside `window`
///   is present. Historical values alone never qualify.
/// - Among recent-viable rows, the lowest rank in `priority` wins. Rows whose
///   method is not ranked by `priority` are never selected.
/// - The winner's full series is kept, not just its recent tail.
/// - A region with candidates but no recent-viable row is left out of the
///   provenance and reported as [`UnselectedReason::Stale`].
///
/// Each region is decided from its own rows only.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        target = "positivity::select",
        skip_all,
        fields(candidates = candidates.len(), window_start = %window.start(), window_end = %window.end()),
    )
)]
pub fn select_best(
    candidates: &CandidateTable,
    window: &RecencyWindow,
    priority: &MethodRegistry,
) -> (SelectionTable, ProvenanceTable) {
    let axis = *candidates.axis();
    let mut by_region: BTreeMap<&RegionId, Vec<(&str, &[Option<f64>])>> = BTreeMap::new();
    for (region, method, row) in candidates.iter() {
        by_region.entry(region).or_default().push((method, row));
    }
    let grouped: Vec<(&RegionId, Vec<(&str, &[Option<f64>])>)> = by_region.into_iter().collect();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<(RegionId, Outcome)> = grouped
        .par_iter()
        .map(|(region, rows)| ((*region).clone(), pick(rows, &axis, window, priority)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<(RegionId, Outcome)> = grouped
        .iter()
        .map(|(region, rows)| ((*region).clone(), pick(rows, &axis, window, priority)))
        .collect();

    let mut table = SelectionTable {
        axis,
        selected: BTreeMap::new(),
        unselected: BTreeMap::new(),
    };
    let mut provenance = ProvenanceTable::new();
    for (region, outcome) in outcomes {
        match outcome {
            Ok(selection) => {
                provenance.insert(region.clone(), selection.method.clone());
                table.selected.insert(region, selection);
            }
            Err(reason) => {
                table.unselected.insert(region, reason);
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "positivity::select",
        selected = table.selected.len(),
        stale = table.unselected.len(),
        truncated_window = window.is_truncated(),
        "selected methods"
    );

    (table, provenance)
}

fn pick(
    rows: &[(&str, &[Option<f64>])],
    axis: &DateAxis,
    window: &RecencyWindow,
    priority: &MethodRegistry,
) -> Outcome {
    let best = rows
        .iter()
        .filter(|(_, row)| {
            window_slice(row, axis, window.dates())
                .is_some_and(|cells| last_present(cells).is_some())
        })
        .filter_map(|(method, row)| priority.rank(method).map(|rank| (rank, *method, *row)))
        .min_by_key(|(rank, _, _)| *rank);

    if let Some((_, method, row)) = best {
        return Ok(Selection {
            method: method.to_string(),
            series: row.to_vec(),
        });
    }

    rows.iter()
        .filter_map(|(_, row)| last_present(row))
        .max()
        .and_then(|idx| axis.date_at(idx))
        .map_or(Err(UnselectedReason::NoCandidates), |last_value| {
            Err(UnselectedReason::Stale { last_value })
        })
}
