use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One input a model variant asks the form layer for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSpec {
    /// Text shown next to the input, e.g. "Tyrosine (µmol/L)".
    pub label: String,
    /// Key the value is stored under in [`PatientInputs`](super::inputs::PatientInputs).
    pub key: String,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

/// An input value echoed back together with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabeledValue {
    pub key: String,
    pub label: String,
    pub value: f64,
}
