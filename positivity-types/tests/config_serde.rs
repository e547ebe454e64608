use positivity_types::{
    FieldId, Method, MethodRegistry, PositivityConfig, PositivityError, ProvenanceTable, RegionId,
    UnselectedReason,
};

fn custom_registry() -> MethodRegistry {
    MethodRegistry::new(vec![
        Method::new("M1", FieldId::new("cases_cum"), FieldId::new("tests_cum")),
        Method::new("M2", FieldId::new("pos_cum"), FieldId::new("tests_cum")),
    ])
    .expect("valid registry")
}

#[test]
fn config_roundtrip_preserves_priority_order() {
    let cfg = PositivityConfig {
        methods: custom_registry(),
        diff_days: 3,
        recent_days: 10,
    };
    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: PositivityConfig = serde_json::from_str(&json).expect("deserialize config");

    assert_eq!(de, cfg);
    assert_eq!(de.methods.rank("M1"), Some(0));
    assert_eq!(de.methods.rank("M2"), Some(1));
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let de: PositivityConfig = serde_json::from_str(r#"{"diff_days": 1}"#).expect("deserialize");
    assert_eq!(de.diff_days, 1);
    assert_eq!(de.recent_days, 14);
    assert_eq!(de.methods, MethodRegistry::default());
}

#[test]
fn deserializing_duplicate_method_names_is_rejected() {
    let json = r#"{
        "methods": [
            {"name": "A", "numerator": "x", "denominator": "y"},
            {"name": "A", "numerator": "z", "denominator": "y"}
        ]
    }"#;
    let res: Result<PositivityConfig, _> = serde_json::from_str(json);
    let err = res.expect_err("duplicate names must fail");
    assert!(err.to_string().contains("duplicate method name"));
}

#[test]
fn zero_day_counts_fail_validation() {
    let cfg = PositivityConfig {
        diff_days: 0,
        ..PositivityConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(PositivityError::InvalidArg(_))));

    let cfg = PositivityConfig {
        recent_days: 0,
        ..PositivityConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(PositivityError::InvalidArg(_))));
    assert!(PositivityConfig::default().validate().is_ok());
}

#[test]
fn provenance_serializes_as_region_map() {
    let table: ProvenanceTable = [
        (RegionId::new("36"), "M2".to_string()),
        (RegionId::new("06"), "M1".to_string()),
    ]
    .into_iter()
    .collect();
    let json = serde_json::to_string(&table).expect("serialize provenance");
    assert_eq!(json, r#"{"06":"M1","36":"M2"}"#);
}

#[test]
fn unselected_reason_roundtrip() {
    let reason = UnselectedReason::Stale {
        last_value: chrono::NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
    };
    let json = serde_json::to_string(&reason).expect("serialize");
    let de: UnselectedReason = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(de, reason);
}

#[test]
fn error_roundtrip_keeps_variant() {
    let err = PositivityError::schema("total_tests");
    let json = serde_json::to_string(&err).expect("serialize");
    let de: PositivityError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(de, err);
    assert!(de.to_string().contains("total_tests"));
}
