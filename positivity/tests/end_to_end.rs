mod helpers;

use helpers::day;
use positivity::{Positivity, ProvenanceTable, RegionId, UnselectedReason};
use positivity_mock::fixtures;

#[test]
fn two_regions_two_methods_pick_by_recent_priority() {
    let (store, registry) = fixtures::two_method_scenario().unwrap();
    let result = Positivity::builder()
        .methods(registry)
        .diff_days(7)
        .recent_days(14)
        .build()
        .unwrap()
        .run(&store)
        .unwrap();

    let expected: ProvenanceTable = [
        (RegionId::new("A"), "M1".to_string()),
        (RegionId::new("B"), "M2".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(result.provenance(), &expected);

    let a = result.selection().get(&RegionId::new("A")).unwrap();
    assert_eq!(a.series().len(), 20);
    assert!(a.series()[..7].iter().all(Option::is_none));
    assert!(a.series()[7..].iter().all(|v| *v == Some(0.1)));

    let b = result.selection().get(&RegionId::new("B")).unwrap();
    assert!(b.series()[7..].iter().all(|v| *v == Some(0.2)));
}

#[test]
fn selected_series_is_the_full_candidate_series() {
    let (store, registry) = fixtures::two_method_scenario().unwrap();
    let result = Positivity::builder()
        .methods(registry)
        .recent_days(3)
        .build()
        .unwrap()
        .run(&store)
        .unwrap();
    let a = RegionId::new("A");
    let chosen = result.selection().get(&a).unwrap();
    assert_eq!(Some(chosen.series()), result.candidates().get(&a, "M1"));
    assert_eq!(
        result.positivity().series(&a, &positivity::POSITIVITY).map(|s| s.len()),
        Some(13)
    );
}

#[test]
fn default_registry_on_us_states() {
    let store = fixtures::us_states().unwrap();
    let result = positivity::run(&store).unwrap();
    for (region, expected) in fixtures::US_STATES_EXPECTED {
        assert_eq!(
            result.provenance().get(&RegionId::new(region)),
            expected,
            "region {region}"
        );
    }
}

#[test]
fn unselected_regions_carry_a_reason() {
    let store = fixtures::us_states().unwrap();
    let result = positivity::run(&store).unwrap();
    let selection = result.selection();

    assert_eq!(
        selection.reason(&RegionId::new("02")),
        Some(UnselectedReason::Stale { last_value: day(29) })
    );
    // Test counter stops growing on day 38: the last non-zero denominator delta is day 44
    assert_eq!(
        selection.reason(&RegionId::new("11")),
        Some(UnselectedReason::Stale { last_value: day(44) })
    );
    assert_eq!(
        selection.reason(&RegionId::new("56")),
        Some(UnselectedReason::InsufficientRange { first_observed: day(55) })
    );
    assert_eq!(selection.reason(&RegionId::new("36")), None);

    let summary = result.summary();
    assert_eq!(summary.regions, 8);
    assert_eq!(summary.selected, 5);
    let counts: Vec<usize> = summary.by_method.iter().map(|(_, n)| *n).collect();
    // Region 36 also reports the third method's fields but the first method outranks it
    assert_eq!(counts, vec![1, 1, 0, 1, 1, 1]);
}

#[test]
fn region_with_data_but_no_method_pair_has_no_candidates() {
    let store = fixtures::us_states_builder()
        .counter(
            "01",
            &positivity::fields::POSITIVE_TESTS,
            positivity_mock::Counter::linear(4.0),
        )
        .build()
        .unwrap();
    let result = positivity::run(&store).unwrap();
    assert_eq!(
        result.selection().reason(&RegionId::new("01")),
        Some(UnselectedReason::NoCandidates)
    );
    assert!(result.provenance().get(&RegionId::new("01")).is_none());
}

#[test]
fn selection_diagnostics_serialize_to_json() {
    let store = fixtures::us_states().unwrap();
    let result = positivity::run(&store).unwrap();
    let json = serde_json::to_value(result.selection()).unwrap();

    assert_eq!(json["axis"]["start"], result.selection().axis().start().to_string());
    for (region, method) in result.provenance().iter() {
        let chosen = &json["selected"][region.as_str()];
        assert_eq!(chosen["method"], method);
        assert_eq!(
            chosen["series"].as_array().map(Vec::len),
            Some(result.selection().axis().len())
        );
    }
    assert!(json["unselected"]["02"]["Stale"]["last_value"].is_string());
    assert!(json["unselected"]["56"]["InsufficientRange"]["first_observed"].is_string());
    assert!(json["selected"].get("02").is_none());
}
