use biorisk_core::models::field::LabeledValue;
use biorisk_core::models::result::{RiskTier, ScoreResult};
use biorisk_models::catalog::ModelVariant;
use serde::Serialize;

/// Everything a report renderer needs for one result.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub model_name: String,
    pub doctor_name: Option<String>,
    pub formula: String,
    pub params: Vec<String>,
    pub inputs: Vec<LabeledValue>,
    pub z: f64,
    pub probability: f64,
    /// Probability as a percentage with one decimal, e.g. "91.7".
    pub probability_percent: String,
    pub conclusion: String,
    pub tier: RiskTier,
    pub recommendations: Vec<String>,
    pub generated_at: jiff::Timestamp,
}

impl ReportData {
    pub fn new(
        variant: &ModelVariant,
        result: &ScoreResult,
        doctor_name: Option<&str>,
        generated_at: jiff::Timestamp,
    ) -> Self {
        Self {
            model_name: variant.name.clone(),
            doctor_name: doctor_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            formula: variant.z_formula.clone(),
            params: variant.params.clone(),
            inputs: result.inputs().to_vec(),
            z: result.z(),
            probability: result.probability(),
            probability_percent: format!("{:.1}", result.probability() * 100.0),
            conclusion: result.conclusion().to_string(),
            tier: result.tier(),
            recommendations: variant.recommendations.for_result(result),
            generated_at,
        }
    }
}
