/// Failure raised by the assessment engine. Assessments either succeed whole or fail here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A single numeric field is unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("{field} must be a finite number (found {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero (found {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be within ({min}, {max}] (found {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Fields are individually fine but contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("health-based violations ({health_based}) exceed total violations ({total})")]
    HealthViolationsExceedTotal { health_based: u32, total: u32 },
    #[error("water system count must be at least 1")]
    NoWaterSystems,
    #[error("city record is missing its {0}")]
    MissingIdentity(&'static str),
}
