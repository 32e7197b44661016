use std::collections::BTreeMap;

use biorisk_core::models::field::FieldSpec;
use biorisk_core::models::inputs::PatientInputs;
use thiserror::Error;

/// Why a single form field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("fill in this field")]
    Empty,

    #[error("enter a number (e.g. 12.34)")]
    NotANumber,
}

/// All field errors for one submission, in field order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} field(s) need attention", .errors.len())]
pub struct FormError {
    pub errors: Vec<(String, FieldError)>,
}

impl FormError {
    /// First offending field, where the form should put focus.
    pub fn first_key(&self) -> Option<&str> {
        self.errors.first().map(|(key, _)| key.as_str())
    }
}

/// Parse one raw text value. Surrounding whitespace is ignored and a comma
/// is accepted as the decimal separator.
pub fn parse_number(raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty);
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::NotANumber),
    }
}

/// Parse every declared field from raw form text.
///
/// A field with no entry in `raw` counts as empty. Entries for undeclared
/// keys are ignored.
pub fn parse_fields(
    fields: &[FieldSpec],
    raw: &BTreeMap<String, String>,
) -> Result<PatientInputs, FormError> {
    let mut inputs = PatientInputs::new();
    let mut errors = Vec::new();

    for field in fields {
        let text = raw.get(&field.key).map(String::as_str).unwrap_or("");
        match parse_number(text) {
            Ok(value) => {
                inputs.insert(field.key.clone(), value);
            }
            Err(e) => errors.push((field.key.clone(), e)),
        }
    }

    if errors.is_empty() {
        Ok(inputs)
    } else {
        Err(FormError { errors })
    }
}
