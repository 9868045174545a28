use serde::{Deserialize, Serialize};

use crate::model::thresholds::AnalysisProfile;

/// Landis & Koch agreement bands. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementBand {
    Poor,
    Slight,
    Fair,
    Moderate,
    Substantial,
    AlmostPerfect,
    Unknown,
}

impl AgreementBand {
    pub fn from_score(score: Option<f64>) -> Self {
        let Some(k) = score else {
            return AgreementBand::Unknown;
        };
        if k.is_nan() {
            AgreementBand::Unknown
        } else if k < 0.0 {
            AgreementBand::Poor
        } else if k < 0.20 {
            AgreementBand::Slight
        } else if k < 0.40 {
            AgreementBand::Fair
        } else if k < 0.60 {
            AgreementBand::Moderate
        } else if k < 0.80 {
            AgreementBand::Substantial
        } else {
            AgreementBand::AlmostPerfect
        }
    }

    pub fn level(self) -> &'static str {
        match self {
            AgreementBand::Poor => "Poor",
            AgreementBand::Slight => "Slight",
            AgreementBand::Fair => "Fair",
            AgreementBand::Moderate => "Moderate",
            AgreementBand::Substantial => "Substantial",
            AgreementBand::AlmostPerfect => "Almost Perfect",
            AgreementBand::Unknown => "Unknown",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AgreementBand::Poor => "Less than chance agreement",
            AgreementBand::Slight => "Slight agreement",
            AgreementBand::Fair => "Fair agreement",
            AgreementBand::Moderate => "Moderate agreement",
            AgreementBand::Substantial => "Substantial agreement",
            AgreementBand::AlmostPerfect => "Almost perfect agreement",
            AgreementBand::Unknown => "Unable to calculate",
        }
    }

    pub fn reliability(self) -> &'static str {
        match self {
            AgreementBand::Poor => "Unreliable",
            AgreementBand::Slight => "Low reliability",
            AgreementBand::Fair => "Moderate reliability",
            AgreementBand::Moderate => "Good reliability",
            AgreementBand::Substantial => "Very good reliability",
            AgreementBand::AlmostPerfect => "Excellent reliability",
            AgreementBand::Unknown => "N/A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidanceTier {
    High,
    Moderate,
    Low,
    Unknown,
}

impl GuidanceTier {
    pub fn from_score(score: Option<f64>, profile: &AnalysisProfile) -> Self {
        match score {
            None => GuidanceTier::Unknown,
            Some(k) if k.is_nan() => GuidanceTier::Unknown,
            Some(k) if k >= profile.guidance_high => GuidanceTier::High,
            Some(k) if k >= profile.guidance_moderate => GuidanceTier::Moderate,
            Some(_) => GuidanceTier::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceTier {
    pub fn from_accuracy(accuracy: f64, profile: &AnalysisProfile) -> Self {
        if accuracy >= profile.tier_excellent {
            PerformanceTier::Excellent
        } else if accuracy >= profile.tier_good {
            PerformanceTier::Good
        } else if accuracy >= profile.tier_fair {
            PerformanceTier::Fair
        } else {
            PerformanceTier::Poor
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bands.rs"]
mod tests;
