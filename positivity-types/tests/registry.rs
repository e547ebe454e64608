use positivity_types::{
    FieldId, Method, MethodRegistry, PositivityError, TEST_POSITIVITY_METHODS, fields,
};

#[test]
fn default_registry_matches_documented_priority() {
    let registry = MethodRegistry::default();
    let names: Vec<&str> = registry.iter().map(Method::name).collect();
    assert_eq!(
        names,
        vec![
            "positiveCasesViral_totalTestEncountersViral",
            "positiveTestsViral_totalTestsViral",
            "positiveCasesViral_totalTestsViral",
            "positiveTests_totalTestsViral",
            "positiveCasesViral_totalTestsPeopleViral",
            "positiveCasesViral_totalTestResults",
        ]
    );
    assert_eq!(registry.len(), TEST_POSITIVITY_METHODS.len());
    for (idx, m) in TEST_POSITIVITY_METHODS.iter().enumerate() {
        assert_eq!(registry.rank(m.name()), Some(idx));
    }
}

#[test]
fn default_registry_fields_are_deduplicated_and_sorted() {
    let fields: Vec<FieldId> = MethodRegistry::default().fields().into_iter().collect();
    assert_eq!(
        fields,
        vec![
            fields::POSITIVE_CASES_VIRAL,
            fields::POSITIVE_TESTS,
            fields::POSITIVE_TESTS_VIRAL,
            fields::TOTAL_TEST_ENCOUNTERS_VIRAL,
            fields::TOTAL_TESTS,
            fields::TOTAL_TESTS_PEOPLE_VIRAL,
            fields::TOTAL_TESTS_VIRAL,
        ]
    );
}

#[test]
fn empty_registry_is_rejected() {
    let err = MethodRegistry::new(vec![]).expect_err("empty");
    assert!(matches!(err, PositivityError::InvalidArg(_)));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = MethodRegistry::new(vec![
        Method::new("A", FieldId::new("x"), FieldId::new("y")),
        Method::new("A", FieldId::new("z"), FieldId::new("y")),
    ])
    .expect_err("duplicate");
    assert!(matches!(err, PositivityError::InvalidArg(_)));
}

#[test]
fn lookups_by_name_and_rank_agree() {
    let registry = MethodRegistry::new(vec![
        Method::new("B", FieldId::new("b_num"), FieldId::new("den")),
        Method::new("A", FieldId::new("a_num"), FieldId::new("den")),
    ])
    .expect("valid");
    assert_eq!(registry.rank("B"), Some(0));
    assert_eq!(registry.rank("A"), Some(1));
    assert_eq!(registry.rank("C"), None);
    assert_eq!(registry.get(1).map(Method::name), Some("A"));
    assert_eq!(
        registry.by_name("A").map(Method::numerator),
        Some(&FieldId::new("a_num"))
    );
}

#[test]
fn static_and_owned_field_ids_compare_equal() {
    assert_eq!(fields::TOTAL_TESTS, FieldId::new("total_tests"));
    assert_eq!(FieldId::from("total_tests"), fields::TOTAL_TESTS);
}
