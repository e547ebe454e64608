use std::collections::BTreeMap;

use chrono::NaiveDate;
use positivity_core::{
    MethodRegistry, MultiRegionTimeseries, PositivityConfig, PositivityError, RegionId,
    compute_deltas,
};

use crate::engine::assemble::{AllMethods, assemble};
use crate::engine::ratio::evaluate_methods;
use crate::engine::select::{RecencyWindow, select_best};

/// Test positivity engine: computes one positivity series per region from
/// cumulative counters, choosing the best available method per region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Positivity {
    cfg: PositivityConfig,
}

/// Builder for a [`Positivity`] engine with custom methods or windows.
#[derive(Debug, Clone, Default)]
pub struct PositivityBuilder {
    cfg: PositivityConfig,
}

impl PositivityBuilder {
    /// Start from the default registry, a 7-day lag and a 14-day window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: PositivityConfig::default(),
        }
    }

    /// Replace the candidate methods.
    ///
    /// Registry order is selection priority: for each region the first method
    /// with recent data wins.
    #[must_use]
    pub fn methods(mut self, methods: MethodRegistry) -> Self {
        self.cfg.methods = methods;
        self
    }

    /// Set the lag, in days, between the two readings of a delta.
    ///
    /// Longer lags smooth reporting noise but need a longer history before
    /// the first delta exists.
    #[must_use]
    pub const fn diff_days(mut self, days: usize) -> Self {
        self.cfg.diff_days = days;
        self
    }

    /// Set the trailing window in which a method must report to be selectable.
    #[must_use]
    pub const fn recent_days(mut self, days: usize) -> Self {
        self.cfg.recent_days = days;
        self
    }

    /// Replace the whole configuration, e.g. one loaded with serde.
    #[must_use]
    pub fn config(mut self, cfg: PositivityConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `diff_days` or `recent_days` is zero.
    pub fn build(self) -> Result<Positivity, PositivityError> {
        self.cfg.validate()?;
        Ok(Positivity { cfg: self.cfg })
    }
}

impl Positivity {
    /// Start building an engine.
    ///
    /// ```
    /// use positivity::{Method, MethodRegistry, Positivity, FieldId};
    ///
    /// let methods = MethodRegistry::new(vec![
    ///     Method::new("M1", FieldId::new("cases_cum"), FieldId::new("tests_cum")),
    ///     Method::new("M2", FieldId::new("pos_cum"), FieldId::new("tests_cum")),
    /// ])?;
    /// let engine = Positivity::builder()
    ///     .methods(methods)
    ///     .diff_days(7)
    ///     .recent_days(14)
    ///     .build()?;
    /// assert_eq!(engine.config().methods.len(), 2);
    /// # Ok::<(), positivity::PositivityError>(())
    /// ```
    #[must_use]
    pub fn builder() -> PositivityBuilder {
        PositivityBuilder::new()
    }

    /// Engine from an explicit configuration.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the configuration fails validation.
    pub fn from_config(cfg: PositivityConfig) -> Result<Self, PositivityError> {
        PositivityBuilder::new().config(cfg).build()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PositivityConfig {
        &self.cfg
    }

    /// Compute positivity for every region in `store`.
    ///
    /// Steps: extract the registry's fields in long form, turn cumulative
    /// counters into `diff_days` deltas, evaluate every method, select per
    /// region within the trailing `recent_days` window, then assemble.
    ///
    /// Regions without recent data are absent from the output and from the
    /// provenance; their reason is available through
    /// [`AllMethods::selection`].
    ///
    /// # Errors
    /// Returns `Schema` if any field used by the registry is absent from
    /// `store`. No partial result is produced in that case.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "positivity::run",
            skip_all,
            fields(
                methods = self.cfg.methods.len(),
                diff_days = self.cfg.diff_days,
                recent_days = self.cfg.recent_days,
            ),
        )
    )]
    pub fn run(&self, store: &MultiRegionTimeseries) -> Result<AllMethods, PositivityError> {
        let fields = self.cfg.methods.fields();
        if let Some(missing) = fields.iter().find(|f| !store.has_field(f)) {
            return Err(PositivityError::schema(missing.as_str()));
        }

        let observations = store.timeseries_long(&fields);
        let mut first_observed: BTreeMap<RegionId, NaiveDate> = BTreeMap::new();
        for obs in &observations {
            first_observed
                .entry(obs.region.clone())
                .and_modify(|d| *d = (*d).min(obs.date))
                .or_insert(obs.date);
        }

        let deltas = compute_deltas(&observations, &fields, self.cfg.diff_days)?;
        let candidates = evaluate_methods(&deltas, &self.cfg.methods)?;
        let window = RecencyWindow::trailing(candidates.axis(), self.cfg.recent_days)?;
        let (mut selection, provenance) = select_best(&candidates, &window, &self.cfg.methods);
        selection.classify_unselected(first_observed, &window, self.cfg.diff_days);

        let result = assemble(selection, provenance, candidates)?;

        #[cfg(feature = "tracing")]
        {
            let summary = result.summary();
            tracing::info!(
                target: "positivity::run",
                regions = summary.regions,
                candidates = summary.candidates,
                selected = summary.selected,
                "positivity run complete"
            );
            for (method, count) in &summary.by_method {
                tracing::debug!(target: "positivity::run", method = %method, regions = count, "method usage");
            }
        }

        Ok(result)
    }
}

/// Run the default engine: default registry, `diff_days = 7`,
/// `recent_days = 14`.
///
/// # Errors
/// Returns `Schema` if a field used by the default registry is absent.
pub fn run(store: &MultiRegionTimeseries) -> Result<AllMethods, PositivityError> {
    Positivity::default().run(store)
}
