use biorisk_core::models::field::LabeledValue;
use biorisk_core::models::result::ScoreResult;

use crate::catalog::ModelVariant;
use crate::classifier::Diagnosis;
use crate::scoring::Score;

pub struct ResultAssembler;

impl ResultAssembler {
    /// Package a score and its diagnosis into an immutable [`ScoreResult`].
    pub fn assemble(
        variant: &ModelVariant,
        score: Score,
        diagnosis: Diagnosis,
        inputs: Vec<LabeledValue>,
    ) -> ScoreResult {
        ScoreResult::new(
            variant.id.clone(),
            score.z,
            score.probability,
            diagnosis.conclusion,
            diagnosis.tier,
            inputs,
        )
    }
}
