use std::collections::HashSet;
use std::path::Path;

use biorisk_core::models::field::FieldSpec;
use biorisk_core::models::result::{RiskTier, ScoreResult};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::error::ModelError;
use crate::scorers::ScorerSpec;

/// Current catalog document version. Documents without a version are
/// treated as version 1.
pub const CATALOG_VERSION: u32 = 1;

/// A named, independently configured scoring profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelVariant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Inputs in display order.
    pub fields: Vec<FieldSpec>,
    /// Probability strictly above this is high risk.
    pub threshold: f64,
    /// Human-readable formula shown on reports.
    pub z_formula: String,
    /// One line per parameter explaining what it measures.
    #[serde(default)]
    pub params: Vec<String>,
    pub high_risk: String,
    pub low_risk: String,
    /// Only used by scorers with a medium tier.
    #[serde(default)]
    pub medium_risk: Option<String>,
    pub scorer: ScorerSpec,
    #[serde(default)]
    pub recommendations: Recommendations,
}

/// Follow-up texts attached to a report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendations {
    #[serde(default)]
    pub high: Vec<String>,
    #[serde(default)]
    pub low: Vec<String>,
    /// Added before the general high-risk list when the flag is set.
    #[serde(default)]
    pub per_flag: Vec<FlagRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlagRecommendation {
    pub key: String,
    pub text: String,
}

impl Recommendations {
    /// Recommendations for a computed result. Flag-specific texts only apply
    /// to high-risk results.
    pub fn for_result(&self, result: &ScoreResult) -> Vec<String> {
        match result.tier() {
            RiskTier::High => self
                .per_flag
                .iter()
                .filter(|r| result.input(&r.key).is_some_and(|v| v.value == 1.0))
                .map(|r| r.text.clone())
                .chain(self.high.iter().cloned())
                .collect(),
            RiskTier::Medium | RiskTier::Low => self.low.clone(),
        }
    }
}

/// Entry for a model selection control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    catalog_version: u32,
    variants: Vec<ModelVariant>,
}

/// Read-only registry of model variants.
///
/// Built once at startup and handed to the engine; there is no global
/// instance and no way to mutate it after construction.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    variants: Vec<ModelVariant>,
}

impl ModelCatalog {
    /// Build a catalog, rejecting inconsistent variants.
    pub fn new(variants: Vec<ModelVariant>) -> Result<Self, ModelError> {
        validate(&variants)?;
        Ok(Self { variants })
    }

    /// The variants compiled into this build.
    pub fn builtin() -> Self {
        Self {
            variants: crate::variants::builtin_variants(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        if doc.catalog_version > CATALOG_VERSION {
            return Err(ModelError::UnsupportedCatalogVersion {
                found: doc.catalog_version,
                supported: CATALOG_VERSION,
            });
        }
        Self::new(doc.variants)
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            variants = catalog.variants.len(),
            "model catalog loaded"
        );
        Ok(catalog)
    }

    /// `(id, name)` pairs in catalog order.
    pub fn variants(&self) -> Vec<VariantSummary> {
        self.variants
            .iter()
            .map(|v| VariantSummary {
                id: v.id.clone(),
                name: v.name.clone(),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelVariant> {
        self.variants.iter()
    }

    /// Look up a variant by ID. Unknown IDs are an error, never a default.
    pub fn get(&self, id: &str) -> Result<&ModelVariant, ModelError> {
        self.variants
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| ModelError::UnknownModel(id.to_string()))
    }

    pub fn fields(&self, id: &str) -> Result<&[FieldSpec], ModelError> {
        Ok(&self.get(id)?.fields)
    }

    pub fn threshold(&self, id: &str) -> Result<f64, ModelError> {
        Ok(self.get(id)?.threshold)
    }
}

fn validate(variants: &[ModelVariant]) -> Result<(), ModelError> {
    if variants.is_empty() {
        return Err(ModelError::InvalidCatalog("catalog has no variants".to_string()));
    }

    let mut ids = HashSet::new();
    for variant in variants {
        let invalid = |msg: String| ModelError::InvalidCatalog(format!("{}: {msg}", variant.id));

        if !ids.insert(variant.id.as_str()) {
            return Err(invalid("duplicate model id".to_string()));
        }
        if !(0.0..=1.0).contains(&variant.threshold) {
            return Err(invalid(format!(
                "threshold {} is outside [0, 1]",
                variant.threshold
            )));
        }
        if variant.fields.is_empty() {
            return Err(invalid("no input fields declared".to_string()));
        }

        let mut keys = HashSet::new();
        for field in &variant.fields {
            if !keys.insert(field.key.as_str()) {
                return Err(invalid(format!("duplicate field key '{}'", field.key)));
            }
        }
        if let Some(missing) = variant
            .scorer
            .required_keys()
            .into_iter()
            .find(|k| !keys.contains(k))
        {
            return Err(invalid(format!(
                "scorer reads '{missing}' which is not a declared field"
            )));
        }
        variant.scorer.validate().map_err(invalid)?;
    }
    Ok(())
}
