use super::domain::CityWaterRecord;
use super::error::{AssessmentError, InvalidInput, ValidationError};

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInput::NonFinite { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, InvalidInput> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(InvalidInput::Negative { field, value });
    }
    Ok(value)
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, InvalidInput> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(InvalidInput::NotPositive { field, value });
    }
    Ok(value)
}

pub(crate) fn violation_counts(
    total: u32,
    health_based: u32,
    water_system_count: u32,
) -> Result<(), ValidationError> {
    if water_system_count == 0 {
        return Err(ValidationError::NoWaterSystems);
    }
    if health_based > total {
        return Err(ValidationError::HealthViolationsExceedTotal {
            health_based,
            total,
        });
    }
    Ok(())
}

/// Reject records that would otherwise produce a misleading verdict.
pub(crate) fn validate_record(record: &CityWaterRecord) -> Result<(), AssessmentError> {
    violation_counts(
        record.violations_total_3yr,
        record.violations_health_based_3yr,
        record.water_system_count,
    )?;

    if let Some(ppm) = record.hardness_ppm {
        non_negative("hardness_ppm", ppm)?;
    }
    if let Some(ppb) = record.lead_ppb_90th {
        non_negative("lead_ppb_90th", ppb)?;
    }
    if let Some(level) = record.lead_action_level_ppb {
        positive("lead_action_level_ppb", level)?;
    }
    if let Some(ppm) = record.copper_ppm_90th {
        non_negative("copper_ppm_90th", ppm)?;
    }
    if let Some(level) = record.copper_action_level_ppm {
        positive("copper_action_level_ppm", level)?;
    }

    Ok(())
}

/// Records kept in a store additionally need a usable key and name.
pub(crate) fn validate_identity(record: &CityWaterRecord) -> Result<(), ValidationError> {
    if record.state_code.trim().len() != 2 {
        return Err(ValidationError::MissingIdentity("two-letter state code"));
    }
    if record.slug.trim().is_empty() {
        return Err(ValidationError::MissingIdentity("slug"));
    }
    if record.name.trim().is_empty() {
        return Err(ValidationError::MissingIdentity("name"));
    }
    Ok(())
}
