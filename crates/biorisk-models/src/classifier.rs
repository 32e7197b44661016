use biorisk_core::models::result::RiskTier;

/// Conclusion text plus tier for one probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub conclusion: String,
    pub tier: RiskTier,
}

pub struct DiagnosisClassifier;

impl DiagnosisClassifier {
    /// Two-tier rule: strictly above the threshold is high risk, anything
    /// else (including exactly the threshold) is low risk.
    pub fn classify(
        probability: f64,
        threshold: f64,
        high_risk: &str,
        low_risk: &str,
    ) -> Diagnosis {
        if probability > threshold {
            Diagnosis {
                conclusion: high_risk.to_string(),
                tier: RiskTier::High,
            }
        } else {
            Diagnosis {
                conclusion: low_risk.to_string(),
                tier: RiskTier::Low,
            }
        }
    }

    /// Three-tier rule: adds a medium band for `medium_above < p <= threshold`.
    ///
    /// Only scorers that opt in call this; the generic path stays two-tier.
    pub fn classify_with_medium(
        probability: f64,
        threshold: f64,
        medium_above: f64,
        high_risk: &str,
        medium_risk: &str,
        low_risk: &str,
    ) -> Diagnosis {
        if probability > threshold {
            return Diagnosis {
                conclusion: high_risk.to_string(),
                tier: RiskTier::High,
            };
        }
        if probability > medium_above {
            return Diagnosis {
                conclusion: medium_risk.to_string(),
                tier: RiskTier::Medium,
            };
        }
        Diagnosis {
            conclusion: low_risk.to_string(),
            tier: RiskTier::Low,
        }
    }
}
