//! biorisk-models
//!
//! Risk model definitions and the scoring pipeline. Pure computation, no
//! I/O beyond optionally reading a catalog file. Each model variant pairs a
//! field schema and decision threshold with a scorer that turns numeric
//! patient inputs into a z-score and a probability.

pub mod assembler;
pub mod catalog;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod scorers;
pub mod scoring;
pub mod variants;

use biorisk_core::models::inputs::PatientInputs;

use catalog::ModelVariant;
use classifier::{Diagnosis, DiagnosisClassifier};
use scoring::{Score, ScoreFailure};

/// Trait implemented by each scorer.
pub trait RiskModel: Send + Sync {
    /// Short scorer identifier used in logs (e.g. "biomarker", "logistic").
    fn kind(&self) -> &'static str;

    /// Compute the z-score and probability for one set of inputs.
    ///
    /// Never panics on bad input: malformed values come back as a typed
    /// [`ScoreFailure`] instead of a neutral score.
    fn score(&self, inputs: &PatientInputs) -> Result<Score, ScoreFailure>;

    /// Map a probability to a conclusion using the variant's threshold and
    /// labels. The default is the strict two-tier rule.
    fn classify(&self, probability: f64, variant: &ModelVariant) -> Diagnosis {
        DiagnosisClassifier::classify(
            probability,
            variant.threshold,
            &variant.high_risk,
            &variant.low_risk,
        )
    }
}
