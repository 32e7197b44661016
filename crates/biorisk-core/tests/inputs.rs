use biorisk_core::error::CoreError;
use biorisk_core::models::field::FieldSpec;
use biorisk_core::models::inputs::PatientInputs;
use biorisk_core::models::result::{RiskTier, ScoreResult};

fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("Age", "age"),
        FieldSpec::new("Tyrosine", "tyrosine"),
    ]
}

#[test]
fn labeled_reports_first_missing_key_in_field_order() {
    let inputs = PatientInputs::new().with("tyrosine", 120.0);
    match inputs.labeled(&fields()) {
        Err(CoreError::MissingField(key)) => assert_eq!(key, "age"),
        other => panic!("expected missing age, got {other:?}"),
    }
}

#[test]
fn labeled_follows_field_order_and_ignores_extra_keys() {
    let inputs: PatientInputs = [("tyrosine", 120.0), ("age", 30.0), ("extra", 1.0)]
        .into_iter()
        .collect();

    let labeled = inputs.labeled(&fields()).unwrap();
    assert_eq!(labeled.len(), 2);
    assert_eq!(labeled[0].key, "age");
    assert_eq!(labeled[0].label, "Age");
    assert_eq!(labeled[1].value, 120.0);
}

#[test]
fn inputs_serialize_as_plain_map() {
    let inputs = PatientInputs::new().with("age", 30.0);
    let json = serde_json::to_string(&inputs).unwrap();
    assert_eq!(json, r#"{"age":30.0}"#);

    let back: PatientInputs = serde_json::from_str(r#"{"age": 41, "no_level": 36.9}"#).unwrap();
    assert_eq!(back.get("age"), Some(41.0));
    assert_eq!(back.get("no_level"), Some(36.9));
}

#[test]
fn score_result_clamps_probability() {
    let high = ScoreResult::new("m", 1.0, 1.7, "high", RiskTier::High, vec![]);
    assert_eq!(high.probability(), 1.0);

    let low = ScoreResult::new("m", -3.0, -0.2, "low", RiskTier::Low, vec![]);
    assert_eq!(low.probability(), 0.0);
}

#[test]
fn risk_tier_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&RiskTier::Medium).unwrap(), "\"medium\"");
    assert_eq!(RiskTier::High.to_string(), "high");
}

#[test]
fn score_result_serializes_clamped_probability() {
    let result = ScoreResult::new("m", 2.0, 1.3, "high", RiskTier::High, vec![]);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["probability"], 1.0);
    assert_eq!(json["tier"], "high");
}
