use std::collections::HashMap;

use biorisk_core::error::CoreError;
use biorisk_core::models::inputs::PatientInputs;
use biorisk_core::models::result::ScoreResult;
use tracing::{debug, warn};

use crate::RiskModel;
use crate::assembler::ResultAssembler;
use crate::catalog::{ModelCatalog, ModelVariant};
use crate::error::ModelError;

/// Scoring pipeline over an injected catalog.
///
/// Scorers are built once per variant at construction. Each call to
/// [`evaluate`](Self::evaluate) is independent: identical inputs always
/// produce an identical result.
pub struct DiagnosticEngine {
    catalog: ModelCatalog,
    scorers: HashMap<String, Box<dyn RiskModel>>,
}

impl DiagnosticEngine {
    pub fn new(catalog: ModelCatalog) -> Self {
        let scorers = catalog
            .iter()
            .map(|v| (v.id.clone(), v.scorer.build()))
            .collect();
        Self { catalog, scorers }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn variant(&self, model_id: &str) -> Result<&ModelVariant, ModelError> {
        self.catalog.get(model_id)
    }

    /// Score one set of inputs against the named variant.
    pub fn evaluate(
        &self,
        model_id: &str,
        inputs: &PatientInputs,
    ) -> Result<ScoreResult, ModelError> {
        let variant = self.catalog.get(model_id)?;
        let scorer = self
            .scorers
            .get(model_id)
            .ok_or_else(|| ModelError::UnknownModel(model_id.to_string()))?;

        let labeled = inputs.labeled(&variant.fields).map_err(|e| match e {
            CoreError::MissingField(key) => ModelError::MissingField {
                model_id: model_id.to_string(),
                key,
            },
        })?;

        let score = scorer.score(inputs).map_err(|reason| {
            warn!(model_id, scorer = scorer.kind(), %reason, "scoring failed");
            ModelError::Scoring {
                model_id: model_id.to_string(),
                reason,
            }
        })?;

        let diagnosis = scorer.classify(score.probability, variant);
        let result = ResultAssembler::assemble(variant, score, diagnosis, labeled);

        debug!(
            model_id,
            z = result.z(),
            probability = result.probability(),
            tier = %result.tier(),
            "evaluation complete"
        );
        Ok(result)
    }
}
