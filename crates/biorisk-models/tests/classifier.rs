use biorisk_core::models::result::RiskTier;
use biorisk_models::classifier::DiagnosisClassifier;

#[test]
fn probability_equal_to_threshold_is_low() {
    let d = DiagnosisClassifier::classify(0.7, 0.7, "high", "low");
    assert_eq!(d.tier, RiskTier::Low);
    assert_eq!(d.conclusion, "low");
}

#[test]
fn probability_just_above_threshold_is_high() {
    let d = DiagnosisClassifier::classify(0.7 + 1e-12, 0.7, "high", "low");
    assert_eq!(d.tier, RiskTier::High);
    assert_eq!(d.conclusion, "high");
}

#[test]
fn two_tier_never_reports_medium() {
    for p in [0.0, 0.31, 0.5, 0.69, 0.7] {
        assert_eq!(
            DiagnosisClassifier::classify(p, 0.7, "high", "low").tier,
            RiskTier::Low
        );
    }
}

#[test]
fn medium_band_is_exclusive_below_and_inclusive_above() {
    let tier = |p| DiagnosisClassifier::classify_with_medium(p, 0.7, 0.3, "h", "m", "l").tier;
    assert_eq!(tier(0.3), RiskTier::Low);
    assert_eq!(tier(0.31), RiskTier::Medium);
    assert_eq!(tier(0.7), RiskTier::Medium);
    assert_eq!(tier(0.71), RiskTier::High);
}
