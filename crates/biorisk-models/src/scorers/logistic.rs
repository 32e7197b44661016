use biorisk_core::models::inputs::PatientInputs;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::RiskModel;
use crate::scoring::{Score, ScoreFailure, finite, logistic};

/// One weighted input of a [`LinearPredictor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinearTerm {
    pub key: String,
    pub coefficient: f64,
}

/// `z = intercept + Σ coefficient · value`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinearPredictor {
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub terms: Vec<LinearTerm>,
}

impl LinearPredictor {
    pub fn required_keys(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.key.as_str()).collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.intercept.is_finite() {
            return Err("logistic intercept must be finite".to_string());
        }
        if let Some(term) = self.terms.iter().find(|t| !t.coefficient.is_finite()) {
            return Err(format!("coefficient for '{}' must be finite", term.key));
        }
        Ok(())
    }

    pub fn z(&self, inputs: &PatientInputs) -> Result<f64, ScoreFailure> {
        let mut z = self.intercept;
        for term in &self.terms {
            z += term.coefficient * finite(inputs, &term.key)?;
        }
        Ok(z)
    }
}

/// Fallback scorer for variants without bespoke logic: the probability is
/// the logistic transform of the variant's linear z.
#[derive(Debug, Clone)]
pub struct GenericLogisticModel {
    predictor: LinearPredictor,
}

impl GenericLogisticModel {
    pub fn new(predictor: LinearPredictor) -> Self {
        Self { predictor }
    }
}

impl RiskModel for GenericLogisticModel {
    fn kind(&self) -> &'static str {
        "logistic"
    }

    fn score(&self, inputs: &PatientInputs) -> Result<Score, ScoreFailure> {
        let z = self.predictor.z(inputs)?;
        if !z.is_finite() {
            return Err(ScoreFailure::NonFiniteResult);
        }
        Ok(Score {
            z,
            probability: logistic(z),
        })
    }
}
