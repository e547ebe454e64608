use std::collections::BTreeSet;

use positivity_core::{
    DateAxis, DeltaTable, Method, MethodRegistry, PositivityError, RegionId, WideTable,
    is_all_missing,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Candidate positivity series, one row per `(region, method name)`.
///
/// Rows are ordered by region, then method name. The registry that produced
/// the rows travels with the table so the selector can rank them without any
/// ambient configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTable {
    rows: WideTable<(RegionId, String)>,
    methods: MethodRegistry,
}

impl CandidateTable {
    /// Wrap already computed rows together with their priority metadata.
    #[must_use]
    pub const fn new(rows: WideTable<(RegionId, String)>, methods: MethodRegistry) -> Self {
        Self { rows, methods }
    }

    /// Date axis shared by every candidate row.
    #[must_use]
    pub const fn axis(&self) -> &DateAxis {
        self.rows.axis()
    }

    /// Methods in priority order.
    #[must_use]
    pub const fn methods(&self) -> &MethodRegistry {
        &self.methods
    }

    /// Underlying wide table.
    #[must_use]
    pub const fn rows(&self) -> &WideTable<(RegionId, String)> {
        &self.rows
    }

    /// Series for `(region, method)`.
    #[must_use]
    pub fn get(&self, region: &RegionId, method: &str) -> Option<&[Option<f64>]> {
        self.rows.get(&(region.clone(), method.to_string()))
    }

    /// Iterate `(region, method, series)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &str, &[Option<f64>])> {
        self.rows
            .iter()
            .map(|((region, method), row)| (region, method.as_str(), row.as_slice()))
    }

    /// Regions with at least one candidate row.
    #[must_use]
    pub fn regions(&self) -> BTreeSet<&RegionId> {
        self.rows.keys().map(|(region, _)| region).collect()
    }

    /// Number of candidate rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no method produced a single value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert to a `polars` frame with `location_id`, `variable` and one
    /// `Float64` column per ISO date.
    ///
    /// # Errors
    /// Returns `Other` if polars rejects the assembled columns.
    #[cfg(feature = "dataframe")]
    pub fn to_dataframe(&self) -> Result<polars::prelude::DataFrame, PositivityError> {
        use polars::prelude::{Column, DataFrame};

        let regions: Vec<&str> = self.iter().map(|(r, _, _)| r.as_str()).collect();
        let methods: Vec<&str> = self.iter().map(|(_, m, _)| m).collect();
        let mut columns = Vec::with_capacity(self.axis().len() + 2);
        columns.push(Column::new("location_id".into(), regions));
        columns.push(Column::new("variable".into(), methods));
        for (idx, date) in self.axis().dates().enumerate() {
            let cells: Vec<Option<f64>> = self
                .iter()
                .map(|(_, _, row)| row.get(idx).copied().flatten())
                .collect();
            columns.push(Column::new(
                date.format("%Y-%m-%d").to_string().into(),
                cells,
            ));
        }
        DataFrame::new(columns).map_err(|e| PositivityError::Other(e.to_string()))
    }
}

/// Apply every method to the delta table.
///
/// Behavior:
/// - For each method and each region holding both a numerator and a
///   denominator row, the ratio is taken cell by cell with
///   [`Method::calculate`].
/// - A missing operand or a zero denominator yields a missing cell.
/// - Rows with no value at all are omitted.
/// - Methods whose fields are absent for a region simply produce no row.
///
/// # Errors
/// Returns `Data` if a computed row does not match the delta axis.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        target = "positivity::ratio",
        skip_all,
        fields(delta_rows = deltas.len(), methods = methods.len()),
    )
)]
pub fn evaluate_methods(
    deltas: &DeltaTable,
    methods: &MethodRegistry,
) -> Result<CandidateTable, PositivityError> {
    let regions: BTreeSet<&RegionId> = deltas.keys().map(|(_, region)| region).collect();
    let jobs: Vec<(&RegionId, &Method)> = regions
        .iter()
        .flat_map(|region| methods.iter().map(move |m| (*region, m)))
        .collect();

    #[cfg(feature = "parallel")]
    let computed: Vec<_> = jobs
        .par_iter()
        .filter_map(|(region, method)| candidate_row(deltas, region, method))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let computed: Vec<_> = jobs
        .iter()
        .filter_map(|(region, method)| candidate_row(deltas, region, method))
        .collect();

    let mut rows = WideTable::new(*deltas.axis());
    for (key, row) in computed {
        rows.insert(key, row)?;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "positivity::ratio",
        regions = regions.len(),
        candidates = rows.len(),
        "evaluated methods"
    );

    Ok(CandidateTable::new(rows, methods.clone()))
}

type CandidateRow = ((RegionId, String), Vec<Option<f64>>);

fn candidate_row(deltas: &DeltaTable, region: &RegionId, method: &Method) -> Option<CandidateRow> {
    let numerator = deltas.get(&(method.numerator().clone(), region.clone()))?;
    let denominator = deltas.get(&(method.denominator().clone(), region.clone()))?;
    let ratios = method.calculate(numerator, denominator);
    if is_all_missing(&ratios) {
        return None;
    }
    Some(((region.clone(), method.name().to_string()), ratios))
}
