use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::field::LabeledValue;

/// Categorical output bucket derived from probability and threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one scoring call, ready for display or export.
///
/// Fields are private: a result is built once and only read afterwards.
/// The probability is clamped to `[0.0, 1.0]` at construction, which is the
/// only way to build one. It serializes for export but never deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    model_id: String,
    z: f64,
    probability: f64,
    conclusion: String,
    tier: RiskTier,
    inputs: Vec<LabeledValue>,
}

impl ScoreResult {
    pub fn new(
        model_id: impl Into<String>,
        z: f64,
        probability: f64,
        conclusion: impl Into<String>,
        tier: RiskTier,
        inputs: Vec<LabeledValue>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            z,
            probability: probability.clamp(0.0, 1.0),
            conclusion: conclusion.into(),
            tier,
            inputs,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn conclusion(&self) -> &str {
        &self.conclusion
    }

    pub fn tier(&self) -> RiskTier {
        self.tier
    }

    pub fn inputs(&self) -> &[LabeledValue] {
        &self.inputs
    }

    /// Look up an echoed input by field key.
    pub fn input(&self, key: &str) -> Option<&LabeledValue> {
        self.inputs.iter().find(|v| v.key == key)
    }
}
