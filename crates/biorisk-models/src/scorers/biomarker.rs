use biorisk_core::models::inputs::PatientInputs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::RiskModel;
use crate::catalog::ModelVariant;
use crate::classifier::{Diagnosis, DiagnosisClassifier};
use crate::scoring::{Score, ScoreFailure, finite};

/// Severity band for one biomarker.
///
/// At or below `normal_max` the contribution is `low_score`, at or above
/// `disease` it is `high_score`, and in between it is interpolated linearly.
/// `normal_max == disease` gives a plain step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BiomarkerBand {
    pub normal_max: f64,
    pub disease: f64,
    pub low_score: f64,
    pub high_score: f64,
}

impl BiomarkerBand {
    pub fn step(threshold: f64, low_score: f64, high_score: f64) -> Self {
        Self {
            normal_max: threshold,
            disease: threshold,
            low_score,
            high_score,
        }
    }

    /// Where `value` sits inside the band, from 0.0 (normal) to 1.0 (disease).
    pub fn position(&self, value: f64) -> f64 {
        if value >= self.disease {
            1.0
        } else if value <= self.normal_max {
            0.0
        } else {
            (value - self.normal_max) / (self.disease - self.normal_max)
        }
    }

    pub fn sub_score(&self, value: f64) -> f64 {
        self.low_score + (self.high_score - self.low_score) * self.position(value)
    }

    /// Strictly above the disease boundary.
    pub fn is_elevated(&self, value: f64) -> bool {
        value > self.disease
    }
}

/// A measured blood concentration and how it is scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Marker {
    pub key: String,
    pub band: BiomarkerBand,
    /// Share of this marker in the weighted-continuous probability.
    pub weight: f64,
}

/// A binary clinical complaint and its z contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Complaint {
    pub key: String,
    pub weight: f64,
}

/// Age window, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgeWindow {
    pub key: String,
    pub min: f64,
    pub max: f64,
    /// Added to z inside the window.
    pub bonus: f64,
    /// Added to z outside the window (usually negative).
    pub penalty: f64,
}

impl AgeWindow {
    pub fn contains(&self, age: f64) -> bool {
        self.min <= age && age <= self.max
    }
}

/// How probabilities are turned into tiers for this scorer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "tiers", rename_all = "snake_case")]
#[ts(export)]
pub enum TierPolicy {
    /// High above the threshold, low otherwise.
    #[default]
    TwoTier,
    /// Adds a medium band for `medium_above < p <= threshold`.
    ThreeTier { medium_above: f64 },
}

/// Parameters of the thresholded probability design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ThresholdedParams {
    pub base: f64,
    pub bonus_per_complaint: f64,
    pub min: f64,
    pub max: f64,
    /// Probability when the panel is not fully elevated or no complaint is present.
    pub fallback: f64,
}

impl Default for ThresholdedParams {
    fn default() -> Self {
        Self {
            base: 0.85,
            bonus_per_complaint: 10.0 / 3.0 / 100.0,
            min: 0.70,
            max: 0.95,
            fallback: 0.05,
        }
    }
}

/// Parameters of the weighted-continuous probability design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightedParams {
    pub level_min: f64,
    pub level_max: f64,
    /// Indexed by complaint count; counts past the end use the last entry.
    pub complaint_multipliers: Vec<f64>,
    pub ceiling: f64,
    /// Floor when two or more markers are elevated.
    pub floor_multiple: f64,
    /// Floor when exactly one marker is elevated.
    pub floor_single: f64,
    pub floor_none: f64,
}

impl Default for WeightedParams {
    fn default() -> Self {
        Self {
            level_min: 0.1,
            level_max: 0.9,
            complaint_multipliers: vec![0.8, 1.0, 1.2, 1.5],
            ceiling: 0.95,
            floor_multiple: 0.30,
            floor_single: 0.15,
            floor_none: 0.05,
        }
    }
}

/// Interchangeable probability designs for the biomarker scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "design", rename_all = "snake_case")]
#[ts(export)]
pub enum ProbabilityStrategy {
    /// Fixed high base when every marker is elevated and a complaint is
    /// present, a fixed floor otherwise.
    Thresholded(ThresholdedParams),
    /// Weighted average of per-marker risk levels scaled by complaint count.
    WeightedContinuous(WeightedParams),
}

impl Default for ProbabilityStrategy {
    fn default() -> Self {
        ProbabilityStrategy::Thresholded(ThresholdedParams::default())
    }
}

impl ProbabilityStrategy {
    pub fn weighted() -> Self {
        ProbabilityStrategy::WeightedContinuous(WeightedParams::default())
    }

    /// Probability for a reading that is inside the age window.
    fn in_window(&self, spec: &BiomarkerSpec, reading: &PanelReading) -> f64 {
        let elevated = reading.elevated_count(spec);
        let complaints = reading.complaint_count();
        match self {
            ProbabilityStrategy::Thresholded(params) => {
                if elevated == spec.markers.len() && complaints > 0 {
                    // Not `clamp`: an unvalidated spec may carry min > max.
                    let raw = params.base + complaints as f64 * params.bonus_per_complaint;
                    raw.max(params.min).min(params.max)
                } else {
                    params.fallback
                }
            }
            ProbabilityStrategy::WeightedContinuous(params) => {
                let total_weight: f64 = spec.markers.iter().map(|m| m.weight).sum();
                let weighted: f64 = spec
                    .markers
                    .iter()
                    .zip(&reading.markers)
                    .map(|(marker, &value)| {
                        let level = params.level_min
                            + (params.level_max - params.level_min) * marker.band.position(value);
                        level * marker.weight
                    })
                    .sum::<f64>()
                    / total_weight;

                let multiplier = params
                    .complaint_multipliers
                    .get(complaints)
                    .or(params.complaint_multipliers.last())
                    .copied()
                    .unwrap_or(1.0);

                let floor = match elevated {
                    0 => params.floor_none,
                    1 => params.floor_single,
                    _ => params.floor_multiple,
                };

                (weighted * multiplier).min(params.ceiling).max(floor)
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            ProbabilityStrategy::Thresholded(p) => {
                for (name, v) in [
                    ("base", p.base),
                    ("min", p.min),
                    ("max", p.max),
                    ("fallback", p.fallback),
                ] {
                    check_probability(name, v)?;
                }
                if !p.bonus_per_complaint.is_finite() || p.bonus_per_complaint < 0.0 {
                    return Err("bonus_per_complaint must be a non-negative number".to_string());
                }
                if p.min > p.max {
                    return Err("thresholded min must not exceed max".to_string());
                }
            }
            ProbabilityStrategy::WeightedContinuous(p) => {
                for (name, v) in [
                    ("level_min", p.level_min),
                    ("level_max", p.level_max),
                    ("ceiling", p.ceiling),
                    ("floor_multiple", p.floor_multiple),
                    ("floor_single", p.floor_single),
                    ("floor_none", p.floor_none),
                ] {
                    check_probability(name, v)?;
                }
                if p.level_min > p.level_max {
                    return Err("level_min must not exceed level_max".to_string());
                }
                if p.complaint_multipliers.is_empty() {
                    return Err("complaint_multipliers must not be empty".to_string());
                }
                if p
                    .complaint_multipliers
                    .iter()
                    .any(|m| !m.is_finite() || *m < 0.0)
                {
                    return Err("complaint multipliers must be non-negative numbers".to_string());
                }
            }
        }
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{name} must be within [0, 1] (got {value})"))
    }
}

/// Full parameter set of the biomarker scorer.
///
/// The default is the ovarian endometriosis panel: tyrosine, arginine and
/// nitric oxide plus three complaint flags and a reproductive-age window.
/// Catalog documents may omit any part to inherit these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct BiomarkerSpec {
    pub age: AgeWindow,
    pub markers: Vec<Marker>,
    pub complaints: Vec<Complaint>,
    /// Probability returned whenever age falls outside the window.
    pub out_of_window_probability: f64,
    pub strategy: ProbabilityStrategy,
    pub tier_policy: TierPolicy,
}

impl Default for BiomarkerSpec {
    fn default() -> Self {
        Self {
            age: AgeWindow {
                key: "age".to_string(),
                min: 18.0,
                max: 45.0,
                bonus: 2.0,
                penalty: -5.0,
            },
            markers: vec![
                Marker {
                    key: "tyrosine".to_string(),
                    band: BiomarkerBand {
                        normal_max: 100.0,
                        disease: 123.6,
                        low_score: 0.1,
                        high_score: 3.0,
                    },
                    weight: 0.40,
                },
                Marker {
                    key: "arginine".to_string(),
                    band: BiomarkerBand {
                        normal_max: 150.0,
                        disease: 181.3,
                        low_score: 0.1,
                        high_score: 2.5,
                    },
                    weight: 0.35,
                },
                Marker {
                    key: "no_level".to_string(),
                    band: BiomarkerBand {
                        normal_max: 30.0,
                        disease: 36.8,
                        low_score: 0.1,
                        high_score: 2.0,
                    },
                    weight: 0.25,
                },
            ],
            complaints: vec![
                Complaint {
                    key: "chronic_pain".to_string(),
                    weight: 1.5,
                },
                Complaint {
                    key: "dysmenorrhea".to_string(),
                    weight: 1.2,
                },
                Complaint {
                    key: "infertility".to_string(),
                    weight: 1.0,
                },
            ],
            out_of_window_probability: 0.05,
            strategy: ProbabilityStrategy::default(),
            tier_policy: TierPolicy::default(),
        }
    }
}

impl BiomarkerSpec {
    pub fn with_strategy(mut self, strategy: ProbabilityStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_tier_policy(mut self, tier_policy: TierPolicy) -> Self {
        self.tier_policy = tier_policy;
        self
    }

    pub fn required_keys(&self) -> Vec<&str> {
        std::iter::once(self.age.key.as_str())
            .chain(self.markers.iter().map(|m| m.key.as_str()))
            .chain(self.complaints.iter().map(|c| c.key.as_str()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.markers.is_empty() {
            return Err("biomarker scorer needs at least one marker".to_string());
        }
        if !(self.age.min.is_finite() && self.age.max.is_finite()) || self.age.min > self.age.max {
            return Err("age window bounds must be finite with min <= max".to_string());
        }
        if !(self.age.bonus.is_finite() && self.age.penalty.is_finite()) {
            return Err("age bonus and penalty must be finite".to_string());
        }
        for marker in &self.markers {
            let band = &marker.band;
            let all_finite = [band.normal_max, band.disease, band.low_score, band.high_score]
                .iter()
                .all(|v| v.is_finite());
            if !all_finite {
                return Err(format!("band for '{}' must be finite", marker.key));
            }
            if band.normal_max > band.disease {
                return Err(format!(
                    "band for '{}': normal_max {} exceeds disease {}",
                    marker.key, band.normal_max, band.disease
                ));
            }
            if band.low_score > band.high_score {
                return Err(format!(
                    "band for '{}': low_score must not exceed high_score",
                    marker.key
                ));
            }
            if !marker.weight.is_finite() || marker.weight < 0.0 {
                return Err(format!("weight for '{}' must be non-negative", marker.key));
            }
        }
        if self.markers.iter().map(|m| m.weight).sum::<f64>() <= 0.0 {
            return Err("marker weights must not all be zero".to_string());
        }
        if let Some(c) = self.complaints.iter().find(|c| !c.weight.is_finite()) {
            return Err(format!("weight for complaint '{}' must be finite", c.key));
        }
        check_probability("out_of_window_probability", self.out_of_window_probability)?;
        if let TierPolicy::ThreeTier { medium_above } = self.tier_policy {
            check_probability("medium_above", medium_above)?;
        }
        self.strategy.validate()
    }

    /// Pull and check every value this scorer needs.
    pub fn read(&self, inputs: &PatientInputs) -> Result<PanelReading, ScoreFailure> {
        let age = finite(inputs, &self.age.key)?;
        if age < 0.0 {
            return Err(ScoreFailure::InvalidAge(age));
        }
        let age = age.trunc();

        let markers = self
            .markers
            .iter()
            .map(|m| {
                let value = finite(inputs, &m.key)?;
                if value < 0.0 {
                    return Err(ScoreFailure::NegativeConcentration {
                        key: m.key.clone(),
                        value,
                    });
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let complaints = self
            .complaints
            .iter()
            .map(|c| match finite(inputs, &c.key)? {
                v if v == 0.0 => Ok(false),
                v if v == 1.0 => Ok(true),
                value => Err(ScoreFailure::InvalidFlag {
                    key: c.key.clone(),
                    value,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PanelReading {
            age_in_window: self.age.contains(age),
            markers,
            complaints,
        })
    }

    /// Sum of marker sub-scores, complaint weights and the age factor.
    pub fn z(&self, reading: &PanelReading) -> f64 {
        let markers: f64 = self
            .markers
            .iter()
            .zip(&reading.markers)
            .map(|(m, &v)| m.band.sub_score(v))
            .sum();
        let complaints: f64 = self
            .complaints
            .iter()
            .zip(&reading.complaints)
            .filter(|(_, present)| **present)
            .map(|(c, _)| c.weight)
            .sum();
        let age = if reading.age_in_window {
            self.age.bonus
        } else {
            self.age.penalty
        };
        markers + complaints + age
    }

    pub fn probability(&self, reading: &PanelReading) -> f64 {
        if !reading.age_in_window {
            return self.out_of_window_probability;
        }
        self.strategy.in_window(self, reading)
    }
}

/// Validated values for one scoring call, in the order the scorer declares them.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelReading {
    pub age_in_window: bool,
    pub markers: Vec<f64>,
    pub complaints: Vec<bool>,
}

impl PanelReading {
    pub fn elevated_count(&self, spec: &BiomarkerSpec) -> usize {
        spec.markers
            .iter()
            .zip(&self.markers)
            .filter(|(m, v)| m.band.is_elevated(**v))
            .count()
    }

    pub fn complaint_count(&self) -> usize {
        self.complaints.iter().filter(|c| **c).count()
    }
}

/// Disease-specific scorer over a biomarker panel.
#[derive(Debug, Clone, Default)]
pub struct BiomarkerRiskModel {
    spec: BiomarkerSpec,
}

impl BiomarkerRiskModel {
    pub fn new(spec: BiomarkerSpec) -> Self {
        Self { spec }
    }
}

impl RiskModel for BiomarkerRiskModel {
    fn kind(&self) -> &'static str {
        "biomarker"
    }

    fn score(&self, inputs: &PatientInputs) -> Result<Score, ScoreFailure> {
        let reading = self.spec.read(inputs)?;
        let z = self.spec.z(&reading);
        let probability = self.spec.probability(&reading);

        debug!(
            age_in_window = reading.age_in_window,
            elevated = reading.elevated_count(&self.spec),
            complaints = reading.complaint_count(),
            z,
            probability,
            "biomarker panel scored"
        );

        if !(z.is_finite() && probability.is_finite()) {
            return Err(ScoreFailure::NonFiniteResult);
        }
        Ok(Score {
            z,
            probability: probability.clamp(0.0, 1.0),
        })
    }

    fn classify(&self, probability: f64, variant: &ModelVariant) -> Diagnosis {
        match self.spec.tier_policy {
            TierPolicy::TwoTier => DiagnosisClassifier::classify(
                probability,
                variant.threshold,
                &variant.high_risk,
                &variant.low_risk,
            ),
            TierPolicy::ThreeTier { medium_above } => DiagnosisClassifier::classify_with_medium(
                probability,
                variant.threshold,
                medium_above,
                &variant.high_risk,
                variant.medium_risk.as_deref().unwrap_or(&variant.low_risk),
                &variant.low_risk,
            ),
        }
    }
}
