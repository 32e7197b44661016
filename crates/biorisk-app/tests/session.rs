use std::collections::BTreeMap;

use biorisk_app::session::{Session, SessionError};
use biorisk_core::models::result::RiskTier;
use biorisk_models::catalog::ModelCatalog;
use biorisk_models::engine::DiagnosticEngine;
use biorisk_models::error::ModelError;
use biorisk_models::variants::endometriosis;

fn session() -> Session {
    Session::new(DiagnosticEngine::new(ModelCatalog::builtin()))
}

fn form(tyrosine: &str) -> BTreeMap<String, String> {
    [
        ("age", "30"),
        ("tyrosine", tyrosine),
        ("arginine", "190"),
        ("no_level", "40,0"),
        ("chronic_pain", "1"),
        ("dysmenorrhea", "1"),
        ("infertility", "0"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn calculate_requires_a_selected_model() {
    let mut s = session();
    assert!(matches!(
        s.calculate(&form("130")),
        Err(SessionError::NoModelSelected)
    ));
}

#[test]
fn selecting_unknown_model_fails() {
    let mut s = session();
    assert!(matches!(
        s.select_model("unknown_model"),
        Err(SessionError::Model(ModelError::UnknownModel(_)))
    ));
}

#[test]
fn calculate_stores_result_until_model_switch() {
    let mut s = session();
    let fields = s.select_model(endometriosis::ID).unwrap();
    assert_eq!(fields.len(), 7);

    let tier = s.calculate(&form("130")).unwrap().tier();
    assert_eq!(tier, RiskTier::High);
    assert!(s.last_result().is_some());

    s.select_model(endometriosis::ID).unwrap();
    assert!(s.last_result().is_none());
}

#[test]
fn failed_calculation_drops_previous_result() {
    let mut s = session();
    s.select_model(endometriosis::ID).unwrap();
    s.calculate(&form("130")).unwrap();

    let err = s.calculate(&form("abc")).unwrap_err();
    match err {
        SessionError::Form(form) => assert_eq!(form.first_key(), Some("tyrosine")),
        other => panic!("expected form error, got {other:?}"),
    }
    assert!(s.last_result().is_none());
}

#[test]
fn report_requires_a_result() {
    let mut s = session();
    s.select_model(endometriosis::ID).unwrap();
    assert!(matches!(
        s.report(None, jiff::Timestamp::UNIX_EPOCH),
        Err(SessionError::NoResult)
    ));

    s.calculate(&form("130")).unwrap();
    let report = s.report(Some("Dr. Ivanova"), jiff::Timestamp::UNIX_EPOCH).unwrap();
    assert_eq!(report.doctor_name.as_deref(), Some("Dr. Ivanova"));
    assert_eq!(report.inputs.len(), 7);
    assert_eq!(report.tier, RiskTier::High);

    s.clear();
    assert!(matches!(
        s.report(None, jiff::Timestamp::UNIX_EPOCH),
        Err(SessionError::NoResult)
    ));
}
