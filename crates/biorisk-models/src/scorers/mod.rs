pub mod biomarker;
pub mod logistic;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::RiskModel;

use biomarker::{BiomarkerRiskModel, BiomarkerSpec};
use logistic::{GenericLogisticModel, LinearPredictor};

/// Which scorer a model variant uses, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ScorerSpec {
    /// Disease-specific biomarker panel scorer.
    Biomarker(BiomarkerSpec),
    /// Logistic transform of a linear predictor.
    Logistic(LinearPredictor),
}

impl ScorerSpec {
    /// Field keys this scorer reads.
    pub fn required_keys(&self) -> Vec<&str> {
        match self {
            ScorerSpec::Biomarker(spec) => spec.required_keys(),
            ScorerSpec::Logistic(predictor) => predictor.required_keys(),
        }
    }

    /// Check internal consistency of the scorer parameters.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ScorerSpec::Biomarker(spec) => spec.validate(),
            ScorerSpec::Logistic(predictor) => predictor.validate(),
        }
    }

    /// Build the scorer described by this spec.
    pub fn build(&self) -> Box<dyn RiskModel> {
        match self {
            ScorerSpec::Biomarker(spec) => Box::new(BiomarkerRiskModel::new(spec.clone())),
            ScorerSpec::Logistic(predictor) => {
                Box::new(GenericLogisticModel::new(predictor.clone()))
            }
        }
    }
}
