use biorisk_models::catalog::ModelCatalog;
use biorisk_models::error::ModelError;
use biorisk_models::variants::{builtin_variants, endometriosis};

const LOGISTIC_CATALOG: &str = r#"{
    "catalog_version": 1,
    "variants": [
        {
            "id": "demo_logistic",
            "name": "Demo logistic model",
            "fields": [
                { "label": "Marker A", "key": "a" },
                { "label": "Marker B", "key": "b" }
            ],
            "threshold": 0.5,
            "z_formula": "Z = -1 + 0.5a + 2b",
            "high_risk": "High",
            "low_risk": "Low",
            "scorer": {
                "kind": "logistic",
                "intercept": -1.0,
                "terms": [
                    { "key": "a", "coefficient": 0.5 },
                    { "key": "b", "coefficient": 2.0 }
                ]
            }
        },
        {
            "id": "panel_weighted",
            "name": "Panel, weighted design",
            "fields": [
                { "label": "Age", "key": "age" },
                { "label": "Tyrosine", "key": "tyrosine" },
                { "label": "Arginine", "key": "arginine" },
                { "label": "NO", "key": "no_level" },
                { "label": "Pain", "key": "chronic_pain" },
                { "label": "Dysmenorrhea", "key": "dysmenorrhea" },
                { "label": "Infertility", "key": "infertility" }
            ],
            "threshold": 0.7,
            "z_formula": "Z = f(panel)",
            "high_risk": "High",
            "low_risk": "Low",
            "medium_risk": "Moderate",
            "scorer": {
                "kind": "biomarker",
                "strategy": { "design": "weighted_continuous", "level_min": 0.1, "level_max": 0.9,
                              "complaint_multipliers": [0.8, 1.0, 1.2, 1.5], "ceiling": 0.95,
                              "floor_multiple": 0.3, "floor_single": 0.15, "floor_none": 0.05 },
                "tier_policy": { "tiers": "three_tier", "medium_above": 0.3 }
            }
        }
    ]
}"#;

#[test]
fn builtin_catalog_passes_validation() {
    assert!(ModelCatalog::new(builtin_variants()).is_ok());
}

#[test]
fn builtin_lists_endometriosis_variant() {
    let catalog = ModelCatalog::builtin();
    let summaries = catalog.variants();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, endometriosis::ID);

    let fields = catalog.fields(endometriosis::ID).unwrap();
    let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "age",
            "tyrosine",
            "arginine",
            "no_level",
            "chronic_pain",
            "dysmenorrhea",
            "infertility"
        ]
    );
    assert_eq!(catalog.threshold(endometriosis::ID).unwrap(), 0.7);
}

#[test]
fn unknown_model_is_not_found() {
    let catalog = ModelCatalog::builtin();
    match catalog.get("unknown_model") {
        Err(ModelError::UnknownModel(id)) => assert_eq!(id, "unknown_model"),
        other => panic!("expected UnknownModel, got {other:?}"),
    }
    assert!(matches!(
        catalog.threshold("unknown_model"),
        Err(ModelError::UnknownModel(_))
    ));
}

#[test]
fn loads_catalog_document() {
    let catalog = ModelCatalog::from_json(LOGISTIC_CATALOG).unwrap();
    let ids: Vec<_> = catalog.variants().into_iter().map(|v| v.id).collect();
    assert_eq!(ids, ["demo_logistic", "panel_weighted"]);
    assert_eq!(
        catalog.get("panel_weighted").unwrap().medium_risk.as_deref(),
        Some("Moderate")
    );
}

#[test]
fn newer_catalog_version_is_rejected() {
    let json = LOGISTIC_CATALOG.replace("\"catalog_version\": 1", "\"catalog_version\": 9");
    assert!(matches!(
        ModelCatalog::from_json(&json),
        Err(ModelError::UnsupportedCatalogVersion { found: 9, supported: 1 })
    ));
}

#[test]
fn scorer_keys_must_be_declared_fields() {
    let json = LOGISTIC_CATALOG.replace(
        r#"{ "key": "b", "coefficient": 2.0 }"#,
        r#"{ "key": "c", "coefficient": 2.0 }"#,
    );
    match ModelCatalog::from_json(&json) {
        Err(ModelError::InvalidCatalog(msg)) => assert!(msg.contains("'c'"), "{msg}"),
        other => panic!("expected InvalidCatalog, got {other:?}"),
    }
}

#[test]
fn threshold_outside_unit_interval_is_rejected() {
    let mut variant = endometriosis::variant();
    variant.threshold = 1.2;
    assert!(matches!(
        ModelCatalog::new(vec![variant]),
        Err(ModelError::InvalidCatalog(_))
    ));
}

#[test]
fn duplicate_ids_are_rejected() {
    let variants = vec![endometriosis::variant(), endometriosis::variant()];
    assert!(matches!(
        ModelCatalog::new(variants),
        Err(ModelError::InvalidCatalog(msg)) if msg.contains("duplicate model id")
    ));
}

#[test]
fn empty_catalog_is_rejected() {
    assert!(ModelCatalog::new(vec![]).is_err());
}
