use serde::{Deserialize, Serialize};

use super::error::{AssessmentError, InvalidInput};
use super::policy::APPROACHING_LIMIT_RATIO;
use super::validation::{non_negative, positive};

/// Position of a 90th-percentile reading relative to its regulatory action level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionLevelStatus {
    Good,
    Warning,
    Exceeded,
    /// No sample on record. Never equivalent to a zero reading.
    Unknown,
}

pub type LeadStatus = ActionLevelStatus;
pub type CopperStatus = ActionLevelStatus;

impl ActionLevelStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Below EPA Limit",
            Self::Warning => "Near EPA Limit",
            Self::Exceeded => "Exceeds EPA Limit",
            Self::Unknown => "No Data",
        }
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Classify a lead reading with the default 0.75 approaching-limit ratio.
pub fn classify_lead(
    reading_ppb: Option<f64>,
    action_level_ppb: f64,
) -> Result<LeadStatus, AssessmentError> {
    classify_lead_with_ratio(reading_ppb, action_level_ppb, APPROACHING_LIMIT_RATIO)
}

pub fn classify_lead_with_ratio(
    reading_ppb: Option<f64>,
    action_level_ppb: f64,
    approaching_ratio: f64,
) -> Result<LeadStatus, AssessmentError> {
    classify(
        ("lead_ppb_90th", reading_ppb),
        ("lead_action_level_ppb", action_level_ppb),
        approaching_ratio,
    )
}

pub fn classify_copper(
    reading_ppm: Option<f64>,
    action_level_ppm: f64,
) -> Result<CopperStatus, AssessmentError> {
    classify_copper_with_ratio(reading_ppm, action_level_ppm, APPROACHING_LIMIT_RATIO)
}

pub fn classify_copper_with_ratio(
    reading_ppm: Option<f64>,
    action_level_ppm: f64,
    approaching_ratio: f64,
) -> Result<CopperStatus, AssessmentError> {
    classify(
        ("copper_ppm_90th", reading_ppm),
        ("copper_action_level_ppm", action_level_ppm),
        approaching_ratio,
    )
}

fn classify(
    (reading_field, reading): (&'static str, Option<f64>),
    (level_field, action_level): (&'static str, f64),
    approaching_ratio: f64,
) -> Result<ActionLevelStatus, AssessmentError> {
    let action_level = positive(level_field, action_level)?;
    if !(approaching_ratio.is_finite() && approaching_ratio > 0.0 && approaching_ratio <= 1.0) {
        return Err(InvalidInput::OutOfRange {
            field: "approaching_ratio",
            value: approaching_ratio,
            min: 0.0,
            max: 1.0,
        }
        .into());
    }

    let Some(reading) = reading else {
        return Ok(ActionLevelStatus::Unknown);
    };
    let reading = non_negative(reading_field, reading)?;

    let status = if reading > action_level {
        ActionLevelStatus::Exceeded
    } else if reading > action_level * approaching_ratio {
        ActionLevelStatus::Warning
    } else {
        ActionLevelStatus::Good
    };

    Ok(status)
}
