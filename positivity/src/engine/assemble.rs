use positivity_core::{
    FieldId, LongObservation, MultiRegionTimeseries, PositivityError, ProvenanceTable, RunSummary,
    fields,
};

use super::ratio::CandidateTable;
use super::select::SelectionTable;

/// Field under which the selected series are stored.
pub const POSITIVITY: FieldId = fields::POSITIVITY;

/// Outcome of one engine run.
///
/// Holds both the selected output and the unfiltered diagnostics:
/// - `positivity()`: one `positivity` series per selected region, ready to be
///   joined back into the caller's store.
/// - `candidates()`: every method's full series for every region, selected or
///   not.
/// - `provenance()`: the method behind each region's output.
/// - `selection()`: per-region winners and the reason any region was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct AllMethods {
    candidates: CandidateTable,
    positivity: MultiRegionTimeseries,
    provenance: ProvenanceTable,
    selection: SelectionTable,
}

impl AllMethods {
    /// Full multi-method diagnostic table.
    #[must_use]
    pub const fn candidates(&self) -> &CandidateTable {
        &self.candidates
    }

    /// Store holding the selected `positivity` series.
    #[must_use]
    pub const fn positivity(&self) -> &MultiRegionTimeseries {
        &self.positivity
    }

    /// Selected method per region.
    #[must_use]
    pub const fn provenance(&self) -> &ProvenanceTable {
        &self.provenance
    }

    /// Selection diagnostics, including unselected regions.
    #[must_use]
    pub const fn selection(&self) -> &SelectionTable {
        &self.selection
    }

    /// Counts for logging and audit output.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let by_method = self
            .candidates
            .methods()
            .iter()
            .map(|m| {
                let n = self.provenance.iter().filter(|(_, name)| *name == m.name()).count();
                (m.name().to_string(), n)
            })
            .collect();
        RunSummary {
            regions: self.selection.len() + self.selection.unselected().count(),
            candidates: self.candidates.len(),
            selected: self.provenance.len(),
            by_method,
        }
    }

    /// Split into `(candidates, positivity store)`.
    #[must_use]
    pub fn into_parts(self) -> (CandidateTable, MultiRegionTimeseries) {
        (self.candidates, self.positivity)
    }
}

/// Package selected series and diagnostics into an [`AllMethods`].
///
/// Present cells of each selected series become `positivity` observations;
/// missing cells are not materialised. Provenance is attached per
/// `(region, positivity)`.
///
/// # Errors
/// Returns `Data` if `selection` and `provenance` disagree on a region, or if
/// the output store cannot be rebuilt from the selected records.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        target = "positivity::assemble",
        skip_all,
        fields(selected = selection.len(), candidates = candidates.len()),
    )
)]
pub fn assemble(
    selection: SelectionTable,
    provenance: ProvenanceTable,
    candidates: CandidateTable,
) -> Result<AllMethods, PositivityError> {
    let axis = *selection.axis();
    let mut records: Vec<LongObservation> = Vec::new();
    for (region, chosen) in selection.iter() {
        if provenance.get(region) != Some(chosen.method()) {
            return Err(PositivityError::data(format!(
                "provenance for {region} does not name its selected method `{}`",
                chosen.method()
            )));
        }
        records.extend(chosen.series().iter().zip(axis.dates()).filter_map(|(v, date)| {
            v.map(|v| LongObservation::new(POSITIVITY, region.clone(), date, v))
        }));
    }
    if provenance.len() != selection.len() {
        return Err(PositivityError::data(
            "provenance lists regions without a selected series",
        ));
    }

    let labels = provenance
        .iter()
        .map(|(region, method)| ((region.clone(), POSITIVITY), method.to_string()));
    let positivity = MultiRegionTimeseries::from_timeseries_long(records, labels)?;

    Ok(AllMethods {
        candidates,
        positivity,
        provenance,
        selection,
    })
}
