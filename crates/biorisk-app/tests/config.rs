use std::path::PathBuf;

use biorisk_app::config::{
    AppConfig, load_catalog, load_config_from, save_config_to, set_default_model, startup_model,
};
use biorisk_models::catalog::ModelCatalog;
use biorisk_models::variants::endometriosis;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("biorisk-config-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn pre_versioned_config_is_migrated() {
    let dir = scratch("migrate");
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{ "models_file": "/opt/biorisk/catalog.json", "doctor_name": "Dr. Petrov" }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(
        config.catalog_path,
        Some(PathBuf::from("/opt/biorisk/catalog.json"))
    );
    assert_eq!(config.doctor_name.as_deref(), Some("Dr. Petrov"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn newer_config_version_is_rejected() {
    let dir = scratch("newer");
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{ "config_version": 7 }"#).unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn saved_config_round_trips_with_current_version() {
    let dir = scratch("save");
    let path = dir.join("config.json");
    let config = AppConfig {
        default_model: Some(endometriosis::ID.to_string()),
        log_filter: Some("biorisk_models=debug".to_string()),
        ..AppConfig::default()
    };

    save_config_to(&path, &config).unwrap();
    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.default_model, config.default_model);
    assert_eq!(loaded.log_filter, config.log_filter);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn catalog_defaults_to_builtin() {
    let catalog = load_catalog(&AppConfig::default()).unwrap();
    assert!(catalog.get(endometriosis::ID).is_ok());
}

#[test]
fn missing_catalog_file_is_an_error() {
    let config = AppConfig {
        catalog_path: Some(PathBuf::from("/nonexistent/biorisk/catalog.json")),
        ..AppConfig::default()
    };
    assert!(load_catalog(&config).is_err());
}

#[test]
fn startup_model_falls_back_to_first_entry() {
    let catalog = ModelCatalog::builtin();

    let unknown = AppConfig {
        default_model: Some("retired_model".to_string()),
        ..AppConfig::default()
    };
    assert_eq!(
        startup_model(&unknown, &catalog).as_deref(),
        Some(endometriosis::ID)
    );
    assert_eq!(
        startup_model(&AppConfig::default(), &catalog).as_deref(),
        Some(endometriosis::ID)
    );
}

#[test]
fn config_version_past_u32_range_is_rejected() {
    let dir = scratch("huge-version");
    let path = dir.join("config.json");
    // 2^32 + 1 would read as version 1 if narrowed to u32.
    std::fs::write(&path, r#"{ "config_version": 4294967297 }"#).unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"), "{err}");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn default_model_must_exist_in_catalog() {
    let catalog = ModelCatalog::builtin();
    let mut config = AppConfig::default();

    assert!(set_default_model(&mut config, &catalog, "no_such_model").is_err());
    assert_eq!(config.default_model, None);

    set_default_model(&mut config, &catalog, endometriosis::ID).unwrap();
    assert_eq!(config.default_model.as_deref(), Some(endometriosis::ID));
}
