use biorisk_core::models::inputs::PatientInputs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Raw scorer output, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    /// Additive severity score. Unbounded.
    pub z: f64,
    /// Probability in `[0.0, 1.0]`.
    pub probability: f64,
}

/// Why a scorer could not produce a [`Score`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreFailure {
    #[error("no value supplied for '{0}'")]
    MissingValue(String),

    #[error("value for '{key}' is not a finite number")]
    NonFinite { key: String },

    #[error("concentration '{key}' must not be negative (got {value})")]
    NegativeConcentration { key: String, value: f64 },

    #[error("flag '{key}' must be 0 or 1 (got {value})")]
    InvalidFlag { key: String, value: f64 },

    #[error("age must not be negative (got {0})")]
    InvalidAge(f64),

    #[error("computation produced a non-finite result")]
    NonFiniteResult,
}

/// Fetch a finite value from the inputs.
pub(crate) fn finite(inputs: &PatientInputs, key: &str) -> Result<f64, ScoreFailure> {
    let value = inputs
        .get(key)
        .ok_or_else(|| ScoreFailure::MissingValue(key.to_string()))?;
    if !value.is_finite() {
        return Err(ScoreFailure::NonFinite {
            key: key.to_string(),
        });
    }
    Ok(value)
}

/// Standard logistic function.
pub fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
