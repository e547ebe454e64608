use std::collections::BTreeSet;

use chrono::NaiveDate;
use positivity_core::{FieldId, LongObservation, MultiRegionTimeseries, PositivityError, RegionId};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 9, day).unwrap()
}

fn sample() -> MultiRegionTimeseries {
    let cases = FieldId::new("cases");
    let tests = FieldId::new("tests");
    let records = vec![
        LongObservation::new(tests.clone(), RegionId::new("B"), d(2), 20.0),
        LongObservation::new(cases.clone(), RegionId::new("A"), d(1), 1.0),
        LongObservation::new(cases.clone(), RegionId::new("A"), d(2), None),
        LongObservation::new(tests.clone(), RegionId::new("A"), d(1), 10.0),
        LongObservation::new(cases.clone(), RegionId::new("B"), d(3), f64::NAN),
    ];
    let prov = vec![((RegionId::new("A"), tests), "source-a".to_string())];
    MultiRegionTimeseries::from_timeseries_long(records, prov).unwrap()
}

#[test]
fn long_form_is_sorted_and_drops_missing() {
    let store = sample();
    let fields = store.fields();
    let long = store.timeseries_long(&fields);
    let keys: Vec<(String, String, NaiveDate)> = long
        .iter()
        .map(|o| (o.variable.to_string(), o.region.to_string(), o.date))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("cases".into(), "A".into(), d(1)),
            ("tests".into(), "A".into(), d(1)),
            ("tests".into(), "B".into(), d(2)),
        ]
    );
    assert_eq!(store.observation_count(), 3);
}

#[test]
fn long_form_round_trips() {
    let store = sample();
    let long = store.timeseries_long(&store.fields());
    let rebuilt = MultiRegionTimeseries::from_timeseries_long(
        long,
        [(
            (RegionId::new("A"), FieldId::new("tests")),
            "source-a".to_string(),
        )],
    )
    .unwrap();
    assert_eq!(rebuilt, store);
}

#[test]
fn duplicate_keys_are_rejected_even_when_missing() {
    let f = FieldId::new("cases");
    let r = RegionId::new("A");
    let records = vec![
        LongObservation::new(f.clone(), r.clone(), d(1), None),
        LongObservation::new(f, r, d(1), 3.0),
    ];
    let err = MultiRegionTimeseries::from_timeseries_long(records, []).unwrap_err();
    assert!(matches!(err, PositivityError::Data(_)));
}

#[test]
fn subset_keeps_only_requested_regions() {
    let store = sample();
    let sub = store.get_regions_subset([&RegionId::new("B"), &RegionId::new("ZZ")]);
    let regions: Vec<&RegionId> = sub.regions().collect();
    assert_eq!(regions, vec![&RegionId::new("B")]);
    assert_eq!(sub.value(&RegionId::new("B"), &FieldId::new("tests"), d(2)), Some(20.0));
    assert!(sub.provenance(&RegionId::new("A"), &FieldId::new("tests")).is_none());
}

#[test]
fn join_merges_disjoint_series_and_rejects_overlap() {
    let derived = MultiRegionTimeseries::from_timeseries_long(
        [LongObservation::new(FieldId::new("ratio"), RegionId::new("A"), d(1), 0.1)],
        [((RegionId::new("A"), FieldId::new("ratio")), "m1".to_string())],
    )
    .unwrap();
    let joined = sample().join(derived).unwrap();
    assert!(joined.has_field(&FieldId::new("ratio")));
    assert_eq!(
        joined.provenance(&RegionId::new("A"), &FieldId::new("ratio")),
        Some("m1")
    );
    assert_eq!(
        joined.fields(),
        BTreeSet::from([FieldId::new("cases"), FieldId::new("ratio"), FieldId::new("tests")])
    );

    let err = sample().join(sample()).unwrap_err();
    assert!(matches!(err, PositivityError::Data(_)));
}

#[test]
fn serde_json_round_trip() {
    let store = sample();
    let json = serde_json::to_string(&store).unwrap();
    let back: MultiRegionTimeseries = serde_json::from_str(&json).unwrap();
    assert_eq!(back, store);
}
