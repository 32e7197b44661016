use std::path::{Path, PathBuf};

use biorisk_models::catalog::ModelCatalog;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Catalog document to load instead of the built-in variants.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Model selected on startup. Falls back to the first catalog entry.
    #[serde(default)]
    pub default_model: Option<String>,
    /// Physician name pre-filled on exported reports.
    #[serde(default)]
    pub doctor_name: Option<String>,
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("biorisk"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the user config, or defaults when none has been saved yet.
pub fn load_config() -> eyre::Result<AppConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> eyre::Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    let migrated = migrate(json, on_disk_version)?;
    let config: AppConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u64) -> eyre::Result<serde_json::Value> {
    if from_version > u64::from(CURRENT_VERSION) {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update biorisk."
        ));
    }

    // v0 → v1: `models_file` renamed to `catalog_path`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(old) = obj.remove("models_file") {
            obj.entry("catalog_path").or_insert(old);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (models_file → catalog_path)");
    }

    Ok(json)
}

pub fn save_config(config: &AppConfig) -> eyre::Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// The catalog this config points at, or the built-in one.
pub fn load_catalog(config: &AppConfig) -> eyre::Result<ModelCatalog> {
    match &config.catalog_path {
        Some(path) => ModelCatalog::from_path(path)
            .map_err(|e| eyre::eyre!("failed to load catalog {}: {e}", path.display())),
        None => Ok(ModelCatalog::builtin()),
    }
}

/// Set the startup model, rejecting IDs the catalog does not know.
pub fn set_default_model(
    config: &mut AppConfig,
    catalog: &ModelCatalog,
    model_id: &str,
) -> eyre::Result<()> {
    catalog
        .get(model_id)
        .map_err(|e| eyre::eyre!("cannot set default model: {e}"))?;
    config.default_model = Some(model_id.to_string());
    Ok(())
}

/// Model to select on startup: the configured default if the catalog has
/// it, otherwise the first catalog entry.
pub fn startup_model(config: &AppConfig, catalog: &ModelCatalog) -> Option<String> {
    let configured = config
        .default_model
        .as_deref()
        .filter(|id| catalog.get(id).is_ok());
    if configured.is_none() && config.default_model.is_some() {
        tracing::warn!(
            default_model = config.default_model.as_deref(),
            "configured default model not in catalog"
        );
    }
    configured
        .map(str::to_string)
        .or_else(|| catalog.variants().into_iter().next().map(|v| v.id))
}
