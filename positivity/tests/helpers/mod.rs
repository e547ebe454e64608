// Shared fixtures for the positivity integration tests.
#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use positivity::{FieldId, Method, MethodRegistry};
use positivity_mock::fixtures::START;

pub const CASES: FieldId = FieldId::from_static("cases_cum");
pub const POS: FieldId = FieldId::from_static("pos_cum");
pub const TESTS: FieldId = FieldId::from_static("tests_cum");

/// `M1 = cases/tests` ahead of `M2 = pos/tests`.
pub fn two_methods() -> MethodRegistry {
    MethodRegistry::new(vec![
        Method::new("M1", CASES, TESTS),
        Method::new("M2", POS, TESTS),
    ])
    .unwrap()
}

/// Fixture date `n` days after the shared start.
pub fn day(n: u64) -> NaiveDate {
    START.checked_add_days(Days::new(n)).unwrap()
}
