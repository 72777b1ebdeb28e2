//! USGS hardness bands.
//!
//! Bands are half-open `[lo, hi)`: a reading exactly on a threshold belongs to the
//! harder band.

use serde::{Deserialize, Serialize};

use super::error::AssessmentError;
use super::policy::{HardnessThresholds, PPM_PER_GRAIN_PER_GALLON};
use super::validation::non_negative;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HardnessClassification {
    Soft,
    #[serde(rename = "Moderately Hard")]
    ModeratelyHard,
    Hard,
    #[serde(rename = "Very Hard")]
    VeryHard,
}

impl HardnessClassification {
    pub const fn ordered() -> [Self; 4] {
        [Self::Soft, Self::ModeratelyHard, Self::Hard, Self::VeryHard]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Soft => "Soft",
            Self::ModeratelyHard => "Moderately Hard",
            Self::Hard => "Hard",
            Self::VeryHard => "Very Hard",
        }
    }

    /// Hard and very hard water are the bands where a softener is worth suggesting.
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::Hard | Self::VeryHard)
    }
}

/// Classify with the default 60/120/180 ppm bands.
pub fn classify_hardness(ppm: f64) -> Result<HardnessClassification, AssessmentError> {
    classify_hardness_with_thresholds(ppm, &HardnessThresholds::default())
}

pub fn classify_hardness_with_thresholds(
    ppm: f64,
    thresholds: &HardnessThresholds,
) -> Result<HardnessClassification, AssessmentError> {
    let ppm = non_negative("hardness_ppm", ppm)?;

    let classification = if ppm < thresholds.soft_below {
        HardnessClassification::Soft
    } else if ppm < thresholds.moderately_hard_below {
        HardnessClassification::ModeratelyHard
    } else if ppm < thresholds.hard_below {
        HardnessClassification::Hard
    } else {
        HardnessClassification::VeryHard
    };

    Ok(classification)
}

/// ppm to grains per gallon, rounded half away from zero to one decimal.
pub fn ppm_to_grains_per_gallon(ppm: f64) -> f64 {
    (ppm / PPM_PER_GRAIN_PER_GALLON * 10.0).round() / 10.0
}
