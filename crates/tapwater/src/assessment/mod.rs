//! Water-safety assessment engine.
//!
//! Everything here is a pure function of its arguments: the assessor holds only an
//! immutable [`AssessmentPolicy`] and can be shared across threads freely.

mod action_level;
mod domain;
mod error;
mod hardness;
mod policy;
pub(crate) mod validation;
mod verdict;

#[cfg(test)]
mod tests;

pub use action_level::{
    classify_copper, classify_copper_with_ratio, classify_lead, classify_lead_with_ratio,
    ActionLevelStatus, CopperStatus, LeadStatus,
};
pub use domain::{CityKey, CityWaterRecord, WaterSource};
pub use error::{AssessmentError, InvalidInput, ValidationError};
pub use hardness::{
    classify_hardness, classify_hardness_with_thresholds, ppm_to_grains_per_gallon,
    HardnessClassification,
};
pub use policy::{
    ActionLevelPolicy, AssessmentPolicy, HardnessThresholds, PolicyError, ViolationThresholds,
    APPROACHING_LIMIT_RATIO, EPA_COPPER_ACTION_LEVEL_PPM, EPA_LEAD_ACTION_LEVEL_PPB,
    PPM_PER_GRAIN_PER_GALLON,
};
pub use verdict::{select_rule, SafetyAssessment, SafetyVerdict, VerdictRule, VerdictSignals};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{build_report, CityReport};

/// Stateless assessor that applies an [`AssessmentPolicy`] to city records.
#[derive(Debug, Clone, Default)]
pub struct WaterQualityAssessor {
    policy: AssessmentPolicy,
}

impl WaterQualityAssessor {
    pub fn new(policy: AssessmentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AssessmentPolicy {
        &self.policy
    }

    pub fn classify_hardness(&self, ppm: f64) -> Result<HardnessClassification, AssessmentError> {
        classify_hardness_with_thresholds(ppm, &self.policy.hardness)
    }

    /// `action_level_ppb` falls back to the policy's lead action level.
    pub fn classify_lead(
        &self,
        reading_ppb: Option<f64>,
        action_level_ppb: Option<f64>,
    ) -> Result<LeadStatus, AssessmentError> {
        let levels = &self.policy.action_levels;
        classify_lead_with_ratio(
            reading_ppb,
            action_level_ppb.unwrap_or(levels.lead_ppb),
            levels.approaching_ratio,
        )
    }

    pub fn classify_copper(
        &self,
        reading_ppm: Option<f64>,
        action_level_ppm: Option<f64>,
    ) -> Result<CopperStatus, AssessmentError> {
        let levels = &self.policy.action_levels;
        classify_copper_with_ratio(
            reading_ppm,
            action_level_ppm.unwrap_or(levels.copper_ppm),
            levels.approaching_ratio,
        )
    }

    /// Signals the verdict rules read for this record.
    pub fn signals(&self, record: &CityWaterRecord) -> Result<VerdictSignals, AssessmentError> {
        validation::validate_record(record)?;
        let lead = self.classify_lead(record.lead_ppb_90th, record.lead_action_level_ppb)?;

        VerdictSignals::new(
            record.violations_total_3yr,
            record.violations_health_based_3yr,
            record.water_system_count,
            lead,
        )
    }

    pub fn assess(&self, record: &CityWaterRecord) -> Result<SafetyAssessment, AssessmentError> {
        let signals = self.signals(record)?;
        let assessment = verdict::decide(&record.display_name(), &signals, &self.policy.violations);

        debug!(
            city = %record.key(),
            rule = assessment.rule.as_str(),
            verdict = assessment.verdict.label(),
            "verdict rule matched"
        );

        Ok(assessment)
    }

    /// Every classification for one record, validated once.
    pub fn profile(&self, record: &CityWaterRecord) -> Result<WaterQualityProfile, AssessmentError> {
        let safety = self.assess(record)?;

        let hardness = record
            .hardness_ppm
            .map(|ppm| self.classify_hardness(ppm))
            .transpose()?;
        let lead_action_level_ppb = record
            .lead_action_level_ppb
            .unwrap_or(self.policy.action_levels.lead_ppb);
        let lead = self.classify_lead(record.lead_ppb_90th, Some(lead_action_level_ppb))?;
        let copper = self.classify_copper(record.copper_ppm_90th, record.copper_action_level_ppm)?;

        Ok(WaterQualityProfile {
            hardness,
            hardness_ppm: record.hardness_ppm,
            grains_per_gallon: record.hardness_ppm.map(ppm_to_grains_per_gallon),
            lead,
            lead_action_level_ppb,
            copper,
            safety,
        })
    }

    /// Profile plus the reader-facing text for one city.
    pub fn report(&self, record: &CityWaterRecord) -> Result<CityReport, AssessmentError> {
        let profile = self.profile(record)?;
        Ok(build_report(record, profile))
    }
}

/// All derived classifications for one city record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterQualityProfile {
    /// `None` when no hardness sample exists.
    pub hardness: Option<HardnessClassification>,
    pub hardness_ppm: Option<f64>,
    pub grains_per_gallon: Option<f64>,
    pub lead: LeadStatus,
    /// The action level the lead status was judged against.
    pub lead_action_level_ppb: f64,
    pub copper: CopperStatus,
    pub safety: SafetyAssessment,
}
