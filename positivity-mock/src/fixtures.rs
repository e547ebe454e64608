use chrono::NaiveDate;
use positivity_core::{
    FieldId, Method, MethodRegistry, MultiRegionTimeseries, PositivityError, fields,
};

use crate::builder::{Counter, StoreBuilder};

/// First date of every fixture store.
pub const START: NaiveDate = match NaiveDate::from_ymd_opt(2020, 3, 1) {
    Some(d) => d,
    None => panic!("invalid fixture start date"),
};

/// Number of daily dates in the US states fixture.
pub const US_STATES_DAYS: usize = 60;

/// Method each US states fixture region is expected to receive under the
/// default registry, a 7-day lag and a 14-day window. `None` means the region
/// should receive no selection.
pub const US_STATES_EXPECTED: [(&str, Option<&str>); 8] = [
    ("02", None),
    ("06", Some("positiveTests_totalTestsViral")),
    ("11", None),
    ("12", Some("positiveCasesViral_totalTestsPeopleViral")),
    ("36", Some("positiveCasesViral_totalTestEncountersViral")),
    ("48", Some("positiveTestsViral_totalTestsViral")),
    ("53", Some("positiveCasesViral_totalTestResults")),
    ("56", None),
];

/// Builder for eight state-level regions reporting different counter
/// combinations over [`US_STATES_DAYS`] days.
///
/// - `36` reports every viral counter, so the most preferred method wins.
/// - `48`, `06`, `12` and `53` each report exactly one numerator and
///   denominator pair.
/// - `02` stops reporting halfway through and goes stale.
/// - `11` keeps reporting positives but its test counter stops growing, so
///   every recent denominator delta is zero.
/// - `56` starts reporting too late for any delta.
#[must_use]
pub fn us_states_builder() -> StoreBuilder {
    let days = US_STATES_DAYS;
    let flat_from = 38;
    let stalled_tests: Vec<Option<f64>> = (0..days)
        .map(|d| u32::try_from(d.min(flat_from)).ok().map(|d| 100.0 * f64::from(d)))
        .collect();

    StoreBuilder::new(START, days)
        .counter("36", &fields::POSITIVE_CASES_VIRAL, Counter::linear(50.0))
        .counter("36", &fields::TOTAL_TEST_ENCOUNTERS_VIRAL, Counter::linear(1000.0))
        .counter("36", &fields::POSITIVE_TESTS_VIRAL, Counter::linear(60.0))
        .counter("36", &fields::TOTAL_TESTS_VIRAL, Counter::linear(900.0))
        .counter("48", &fields::POSITIVE_TESTS_VIRAL, Counter::linear(120.0))
        .counter("48", &fields::TOTAL_TESTS_VIRAL, Counter::linear(1000.0))
        .counter("06", &fields::POSITIVE_TESTS, Counter::linear(80.0))
        .counter("06", &fields::TOTAL_TESTS_VIRAL, Counter::linear(1000.0))
        .counter("12", &fields::POSITIVE_CASES_VIRAL, Counter::linear(90.0))
        .counter("12", &fields::TOTAL_TESTS_PEOPLE_VIRAL, Counter::linear(600.0))
        .counter("53", &fields::POSITIVE_CASES_VIRAL, Counter::linear(40.0))
        .counter("53", &fields::TOTAL_TESTS, Counter::linear(800.0))
        .counter_between("02", &fields::POSITIVE_TESTS_VIRAL, 0..30, Counter::linear(10.0))
        .counter_between("02", &fields::TOTAL_TESTS_VIRAL, 0..30, Counter::linear(200.0))
        .counter("11", &fields::POSITIVE_TESTS_VIRAL, Counter::linear(5.0))
        .counter("11", &fields::TOTAL_TESTS_VIRAL, Counter::Values(stalled_tests))
        .counter_between("56", &fields::POSITIVE_TESTS_VIRAL, 55..days, Counter::linear(3.0))
        .counter_between("56", &fields::TOTAL_TESTS_VIRAL, 55..days, Counter::linear(30.0))
        .provenance("36", &fields::POSITIVE_CASES_VIRAL, "state-dashboard")
        .provenance("48", &fields::TOTAL_TESTS_VIRAL, "state-dashboard")
}

/// Store built from [`us_states_builder`].
///
/// # Errors
/// Propagates store construction errors; none occur for the fixed rules.
pub fn us_states() -> Result<MultiRegionTimeseries, PositivityError> {
    us_states_builder().build()
}

/// Field names used by [`two_method_scenario`].
pub mod scenario_fields {
    use positivity_core::FieldId;

    /// Cumulative confirmed cases.
    pub const CASES_CUM: FieldId = FieldId::from_static("cases_cum");
    /// Cumulative positive tests.
    pub const POS_CUM: FieldId = FieldId::from_static("pos_cum");
    /// Cumulative tests.
    pub const TESTS_CUM: FieldId = FieldId::from_static("tests_cum");
}

/// Two regions, two methods, 20 daily dates.
///
/// `M1 = cases_cum / tests_cum` has priority over `M2 = pos_cum / tests_cum`.
/// Region `A` reports M1's fields throughout. Region `B` reports `cases_cum`
/// once on the first day only, so it can only be served by M2. With a 7-day
/// lag and a 14-day window the expected provenance is `{A: M1, B: M2}`.
///
/// # Errors
/// Propagates registry or store construction errors; none occur for the
/// fixed inputs.
pub fn two_method_scenario() -> Result<(MultiRegionTimeseries, MethodRegistry), PositivityError> {
    use scenario_fields::{CASES_CUM, POS_CUM, TESTS_CUM};

    let registry = MethodRegistry::new(vec![
        Method::new("M1", CASES_CUM, TESTS_CUM),
        Method::new("M2", POS_CUM, TESTS_CUM),
    ])?;
    let store = StoreBuilder::new(START, 20)
        .counter("A", &CASES_CUM, Counter::linear(10.0))
        .counter("A", &TESTS_CUM, Counter::linear(100.0))
        .counter_between("B", &CASES_CUM, 0..1, Counter::linear(10.0))
        .counter("B", &POS_CUM, Counter::linear(20.0))
        .counter("B", &TESTS_CUM, Counter::linear(100.0))
        .build()?;
    Ok((store, registry))
}

/// Every field referenced by the default registry.
#[must_use]
pub fn default_fields() -> Vec<FieldId> {
    MethodRegistry::default().fields().into_iter().collect()
}
