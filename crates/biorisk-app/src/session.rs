use std::collections::BTreeMap;

use biorisk_core::models::field::FieldSpec;
use biorisk_core::models::result::ScoreResult;
use biorisk_export::report::ReportData;
use biorisk_models::catalog::ModelVariant;
use biorisk_models::engine::DiagnosticEngine;
use biorisk_models::error::ModelError;
use thiserror::Error;
use tracing::info;

use crate::form::{FormError, parse_fields};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no model selected")]
    NoModelSelected,

    #[error("no result to export: run a calculation first")]
    NoResult,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// State behind one open window: the selected model and the last result.
///
/// The result belongs to the current model and inputs only. Switching model,
/// clearing, or a failed calculation drops it.
pub struct Session {
    engine: DiagnosticEngine,
    current: Option<String>,
    last_result: Option<ScoreResult>,
}

impl Session {
    pub fn new(engine: DiagnosticEngine) -> Self {
        Self {
            engine,
            current: None,
            last_result: None,
        }
    }

    pub fn engine(&self) -> &DiagnosticEngine {
        &self.engine
    }

    /// Select a model and return the fields the form should show.
    pub fn select_model(&mut self, model_id: &str) -> Result<&[FieldSpec], SessionError> {
        let variant = self.engine.variant(model_id)?;
        self.current = Some(variant.id.clone());
        self.last_result = None;
        info!(model_id, "model selected");
        Ok(&variant.fields)
    }

    pub fn current_variant(&self) -> Result<&ModelVariant, SessionError> {
        let id = self.current.as_deref().ok_or(SessionError::NoModelSelected)?;
        Ok(self.engine.variant(id)?)
    }

    /// Parse raw form text and score it against the selected model.
    pub fn calculate(
        &mut self,
        raw: &BTreeMap<String, String>,
    ) -> Result<&ScoreResult, SessionError> {
        self.last_result = None;
        let variant = self.current_variant()?;
        let inputs = parse_fields(&variant.fields, raw)?;
        let result = self.engine.evaluate(&variant.id, &inputs)?;
        Ok(self.last_result.insert(result))
    }

    pub fn last_result(&self) -> Option<&ScoreResult> {
        self.last_result.as_ref()
    }

    /// Drop the last result, keeping the selected model.
    pub fn clear(&mut self) {
        self.last_result = None;
    }

    /// Build the export payload for the last result.
    pub fn report(
        &self,
        doctor_name: Option<&str>,
        generated_at: jiff::Timestamp,
    ) -> Result<ReportData, SessionError> {
        let result = self.last_result.as_ref().ok_or(SessionError::NoResult)?;
        let variant = self.current_variant()?;
        Ok(ReportData::new(variant, result, doctor_name, generated_at))
    }
}
