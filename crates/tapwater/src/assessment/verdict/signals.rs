use serde::Serialize;

use super::super::action_level::{ActionLevelStatus, LeadStatus};
use super::super::error::AssessmentError;
use super::super::validation::violation_counts;

/// Inputs the verdict rules read, derived once per record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerdictSignals {
    pub total: u32,
    pub health_based: u32,
    pub monitoring: u32,
    pub water_system_count: u32,
    /// Health violations normalized by the number of systems aggregated into the record.
    pub health_per_system: f64,
    pub lead: LeadStatus,
}

impl VerdictSignals {
    pub fn new(
        total: u32,
        health_based: u32,
        water_system_count: u32,
        lead: LeadStatus,
    ) -> Result<Self, AssessmentError> {
        violation_counts(total, health_based, water_system_count)?;

        Ok(Self {
            total,
            health_based,
            monitoring: total - health_based,
            water_system_count,
            health_per_system: f64::from(health_based) / f64::from(water_system_count),
            lead,
        })
    }

    pub fn has_lead_issue(&self) -> bool {
        self.lead == ActionLevelStatus::Exceeded
    }
}
