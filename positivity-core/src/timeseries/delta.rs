use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use positivity_types::{FieldId, PositivityError, RegionId};

use super::axis::DateAxis;
use super::store::LongObservation;
use super::table::WideTable;

/// Dense cumulative values or deltas keyed by `(variable, region)`.
pub type DeltaTable = WideTable<(FieldId, RegionId)>;

/// Turn long-form cumulative observations into `diff_days`-lag deltas.
///
/// - Observations for fields outside `fields` are ignored.
/// - All rows share one contiguous axis spanning the earliest to the latest
///   observed date across every requested field, not per field.
/// - There is one row per `(variable, region)` with at least one observation.
/// - `delta[d] = value[d] - value[d - diff_days]`; it is missing unless both
///   readings are present. Negative deltas are kept as is.
///
/// ```
/// use std::collections::BTreeSet;
/// use chrono::NaiveDate;
/// use positivity_core::{FieldId, LongObservation, RegionId, compute_deltas};
///
/// let tests = FieldId::new("tests_cum");
/// let tx = RegionId::new("48");
/// let obs: Vec<LongObservation> = [10.0, 15.0, 25.0, 40.0]
///     .into_iter()
///     .enumerate()
///     .map(|(i, v)| {
///         let date = NaiveDate::from_ymd_opt(2020, 8, 1 + i as u32).unwrap();
///         LongObservation::new(tests.clone(), tx.clone(), date, v)
///     })
///     .collect();
/// let fields = BTreeSet::from([tests.clone()]);
/// let deltas = compute_deltas(&obs, &fields, 1).unwrap();
/// assert_eq!(
///     deltas.get(&(tests, tx)).unwrap(),
///     &[None, Some(5.0), Some(10.0), Some(15.0)]
/// );
/// ```
///
/// # Errors
/// - `InvalidArg` if `diff_days` is zero or `fields` is empty.
/// - `Schema` if a requested field never appears in `observations`.
/// - `Data` if two observations share the same `(variable, region, date)`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        target = "positivity::delta",
        skip_all,
        fields(
            observations = observations.len(),
            field_count = fields.len(),
            diff_days = diff_days,
        ),
    )
)]
pub fn compute_deltas(
    observations: &[LongObservation],
    fields: &BTreeSet<FieldId>,
    diff_days: usize,
) -> Result<DeltaTable, PositivityError> {
    if diff_days == 0 {
        return Err(PositivityError::invalid_arg("diff_days must be positive"));
    }
    if fields.is_empty() {
        return Err(PositivityError::invalid_arg("no fields requested"));
    }

    let relevant: Vec<&LongObservation> = observations
        .iter()
        .filter(|o| fields.contains(&o.variable))
        .collect();
    let observed: BTreeSet<&FieldId> = relevant.iter().map(|o| &o.variable).collect();
    if let Some(missing) = fields.iter().find(|f| !observed.contains(f)) {
        return Err(PositivityError::schema(missing.as_str()));
    }

    let axis = DateAxis::spanning(relevant.iter().map(|o| o.date))
        .ok_or_else(|| PositivityError::data("no observations for the requested fields"))?;
    let cumulative = reshape(axis, relevant)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "positivity::delta",
        rows = cumulative.len(),
        start = %axis.start(),
        end = %axis.end(),
        "reshaped cumulative series onto shared axis"
    );

    Ok(cumulative.map_rows(|row| diff_row(row, diff_days)))
}

/// Sparse-to-dense reshape: place each observation on `axis` under its
/// `(variable, region)` row, leaving unobserved dates missing.
///
/// NaN values are stored as missing.
///
/// # Errors
/// Returns `Data` for duplicate `(variable, region, date)` observations or for
/// a date outside `axis`.
pub fn reshape<'a, I>(axis: DateAxis, observations: I) -> Result<DeltaTable, PositivityError>
where
    I: IntoIterator<Item = &'a LongObservation>,
{
    let mut table = DeltaTable::new(axis);
    let mut seen: BTreeSet<(&FieldId, &RegionId, NaiveDate)> = BTreeSet::new();
    let mut rows: BTreeMap<(FieldId, RegionId), Vec<Option<f64>>> = BTreeMap::new();

    for obs in observations {
        if !seen.insert((&obs.variable, &obs.region, obs.date)) {
            return Err(PositivityError::data(format!(
                "duplicate observation for {} in {} on {}",
                obs.variable, obs.region, obs.date
            )));
        }
        let idx = axis.index_of(obs.date).ok_or_else(|| {
            PositivityError::data(format!("{} lies outside the date axis", obs.date))
        })?;
        let row = rows
            .entry((obs.variable.clone(), obs.region.clone()))
            .or_insert_with(|| vec![None; axis.len()]);
        if let Some(cell) = row.get_mut(idx) {
            *cell = obs.value.filter(|v| !v.is_nan());
        }
    }

    for (key, row) in rows {
        table.insert(key, row)?;
    }
    Ok(table)
}

/// Lag difference along a dense row: `out[i] = row[i] - row[i - lag]`, missing
/// unless both cells are present. The first `lag` cells are always missing.
#[must_use]
pub fn diff_row(row: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    row.iter()
        .enumerate()
        .map(|(i, cur)| {
            let prev = i.checked_sub(lag).and_then(|j| row.get(j)).copied().flatten();
            match (*cur, prev) {
                (Some(c), Some(p)) => Some(c - p),
                _ => None,
            }
        })
        .collect()
}
