use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::field::{FieldSpec, LabeledValue};

/// Numeric patient inputs keyed by field key.
///
/// Values are already parsed; the core never sees free text. Clinical flags
/// are carried as `0.0` / `1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientInputs(BTreeMap<String, f64>);

impl PatientInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Pair each declared field with its value, preserving field order.
    /// Keys present in the inputs but not declared are ignored.
    pub fn labeled(&self, fields: &[FieldSpec]) -> Result<Vec<LabeledValue>, CoreError> {
        fields
            .iter()
            .map(|f| {
                let value = self
                    .get(&f.key)
                    .ok_or_else(|| CoreError::MissingField(f.key.clone()))?;
                Ok(LabeledValue {
                    key: f.key.clone(),
                    label: f.label.clone(),
                    value,
                })
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for PatientInputs {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
