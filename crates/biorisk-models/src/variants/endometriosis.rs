use biorisk_core::models::field::FieldSpec;

use crate::catalog::{FlagRecommendation, ModelVariant, Recommendations};
use crate::scorers::ScorerSpec;
use crate::scorers::biomarker::BiomarkerSpec;

pub const ID: &str = "endometriosis_diagnostics";

/// Ovarian endometriosis risk from plasma tyrosine, arginine and nitric
/// oxide plus three clinical complaints. Valid for ages 18–45.
pub fn variant() -> ModelVariant {
    ModelVariant {
        id: ID.to_string(),
        name: "Ovarian endometriosis risk assessment".to_string(),
        description: "Estimates the probability of ovarian endometriosis from plasma \
                      amino-acid and nitric oxide levels combined with clinical complaints."
            .to_string(),
        fields: vec![
            FieldSpec::new("Age (18-45 years)", "age"),
            FieldSpec::new("Tyrosine (µmol/L)", "tyrosine"),
            FieldSpec::new("Arginine (µmol/L)", "arginine"),
            FieldSpec::new("NO (µmol/L)", "no_level"),
            FieldSpec::new("Chronic pelvic pain (0 - no, 1 - yes)", "chronic_pain"),
            FieldSpec::new("Dysmenorrhea (0 - no, 1 - yes)", "dysmenorrhea"),
            FieldSpec::new("Infertility (0 - no, 1 - yes)", "infertility"),
        ],
        threshold: 0.7,
        z_formula: "Z = f(Tyrosine, Arginine, NO, complaints)".to_string(),
        params: vec![
            "Tyrosine: plasma tyrosine concentration (µmol/L)".to_string(),
            "Arginine: plasma arginine concentration (µmol/L)".to_string(),
            "NO: plasma nitric oxide level (µmol/L)".to_string(),
            "Complaints: chronic pelvic pain, dysmenorrhea, infertility".to_string(),
        ],
        high_risk: "High risk of ovarian endometriosis (probability >70%)".to_string(),
        low_risk: "Low risk of ovarian endometriosis (probability <70%)".to_string(),
        // Shown only when a catalog override selects the three-tier policy.
        medium_risk: Some("Moderate risk of ovarian endometriosis".to_string()),
        scorer: ScorerSpec::Biomarker(BiomarkerSpec::default()),
        recommendations: Recommendations {
            high: vec![
                "Serum CA-125 measurement".to_string(),
                "Pelvic MRI".to_string(),
                "Diagnostic laparoscopy".to_string(),
            ],
            low: vec![
                "Routine gynecological examination once a year".to_string(),
                "Repeat analysis in 6 months if complaints persist".to_string(),
            ],
            per_flag: vec![
                flag("chronic_pain", "Gynecologist-endocrinologist consultation"),
                flag("dysmenorrhea", "Pelvic ultrasound"),
                flag("infertility", "Reproductive specialist consultation"),
            ],
        },
    }
}

fn flag(key: &str, text: &str) -> FlagRecommendation {
    FlagRecommendation {
        key: key.to_string(),
        text: text.to_string(),
    }
}
