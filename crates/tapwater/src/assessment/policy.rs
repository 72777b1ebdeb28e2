use serde::{Deserialize, Serialize};

/// EPA Lead and Copper Rule action level for lead, 90th percentile.
pub const EPA_LEAD_ACTION_LEVEL_PPB: f64 = 15.0;
/// EPA Lead and Copper Rule action level for copper, 90th percentile.
pub const EPA_COPPER_ACTION_LEVEL_PPM: f64 = 1.3;
/// Share of the action level above which a reading counts as approaching it.
pub const APPROACHING_LIMIT_RATIO: f64 = 0.75;
/// 1 grain per gallon expressed in ppm (mg/L as CaCO3).
pub const PPM_PER_GRAIN_PER_GALLON: f64 = 17.1;

/// Every tunable threshold used by the assessor.
///
/// Deserializes field by field over the defaults, so a policy file only has to name
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssessmentPolicy {
    pub hardness: HardnessThresholds,
    pub action_levels: ActionLevelPolicy,
    pub violations: ViolationThresholds,
}

/// Upper bounds (exclusive) of the USGS hardness bands, in ppm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HardnessThresholds {
    pub soft_below: f64,
    pub moderately_hard_below: f64,
    pub hard_below: f64,
}

impl Default for HardnessThresholds {
    fn default() -> Self {
        Self {
            soft_below: 60.0,
            moderately_hard_below: 120.0,
            hard_below: 180.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionLevelPolicy {
    pub lead_ppb: f64,
    pub copper_ppm: f64,
    pub approaching_ratio: f64,
}

impl Default for ActionLevelPolicy {
    fn default() -> Self {
        Self {
            lead_ppb: EPA_LEAD_ACTION_LEVEL_PPB,
            copper_ppm: EPA_COPPER_ACTION_LEVEL_PPM,
            approaching_ratio: APPROACHING_LIMIT_RATIO,
        }
    }
}

/// Violation counts that move a city between verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViolationThresholds {
    /// Monitoring violations at or above this downgrade a clean record to generally safe.
    pub high_monitoring_volume: u32,
    /// Health violations per system strictly above this are unsafe on their own.
    pub unsafe_per_system: f64,
    /// Health violations strictly above this are unsafe when paired with `elevated_per_system`.
    pub elevated_total: u32,
    pub elevated_per_system: f64,
    /// Health violations at or above this raise concerns.
    pub concerns_total: u32,
    /// Health violations per system at or above this raise concerns.
    pub concerns_per_system: f64,
}

impl Default for ViolationThresholds {
    fn default() -> Self {
        Self {
            high_monitoring_volume: 20,
            unsafe_per_system: 5.0,
            elevated_total: 10,
            elevated_per_system: 2.0,
            concerns_total: 3,
            concerns_per_system: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("{field} must be a finite, positive number (found {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error(
        "hardness thresholds must ascend (soft {soft} < moderately hard {moderately_hard} < hard {hard})"
    )]
    HardnessOrder {
        soft: f64,
        moderately_hard: f64,
        hard: f64,
    },
    #[error("approaching_ratio must be within (0, 1] (found {0})")]
    ApproachingRatio(f64),
}

impl AssessmentPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        let hardness = &self.hardness;
        require_positive("hardness.soft_below", hardness.soft_below)?;
        require_positive("hardness.moderately_hard_below", hardness.moderately_hard_below)?;
        require_positive("hardness.hard_below", hardness.hard_below)?;
        if !(hardness.soft_below < hardness.moderately_hard_below
            && hardness.moderately_hard_below < hardness.hard_below)
        {
            return Err(PolicyError::HardnessOrder {
                soft: hardness.soft_below,
                moderately_hard: hardness.moderately_hard_below,
                hard: hardness.hard_below,
            });
        }

        let levels = &self.action_levels;
        require_positive("action_levels.lead_ppb", levels.lead_ppb)?;
        require_positive("action_levels.copper_ppm", levels.copper_ppm)?;
        let ratio = levels.approaching_ratio;
        if !(ratio.is_finite() && ratio > 0.0 && ratio <= 1.0) {
            return Err(PolicyError::ApproachingRatio(ratio));
        }

        let violations = &self.violations;
        require_positive("violations.unsafe_per_system", violations.unsafe_per_system)?;
        require_positive("violations.elevated_per_system", violations.elevated_per_system)?;
        require_positive("violations.concerns_per_system", violations.concerns_per_system)?;

        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PolicyError::NotPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_thresholds() {
        let policy = AssessmentPolicy::default();
        assert_eq!(policy.hardness.soft_below, 60.0);
        assert_eq!(policy.hardness.moderately_hard_below, 120.0);
        assert_eq!(policy.hardness.hard_below, 180.0);
        assert_eq!(policy.action_levels.lead_ppb, 15.0);
        assert_eq!(policy.action_levels.copper_ppm, 1.3);
        assert_eq!(policy.action_levels.approaching_ratio, 0.75);
        assert_eq!(policy.violations.high_monitoring_volume, 20);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn partial_documents_keep_remaining_defaults() {
        let policy: AssessmentPolicy = serde_json::from_str(
            r#"{ "action_levels": { "approaching_ratio": 0.5 }, "violations": { "concerns_total": 5 } }"#,
        )
        .expect("policy parses");

        assert_eq!(policy.action_levels.approaching_ratio, 0.5);
        assert_eq!(policy.action_levels.lead_ppb, EPA_LEAD_ACTION_LEVEL_PPB);
        assert_eq!(policy.violations.concerns_total, 5);
        assert_eq!(policy.violations.unsafe_per_system, 5.0);
        assert_eq!(policy.hardness, HardnessThresholds::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<AssessmentPolicy>(r#"{ "hardness": { "soft": 50 } }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn validate_rejects_unordered_hardness_bands() {
        let mut policy = AssessmentPolicy::default();
        policy.hardness.moderately_hard_below = 200.0;

        match policy.validate() {
            Err(PolicyError::HardnessOrder { hard, .. }) => assert_eq!(hard, 180.0),
            other => panic!("expected hardness order error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_ratio_outside_unit_interval() {
        let mut policy = AssessmentPolicy::default();
        policy.action_levels.approaching_ratio = 1.5;
        assert_eq!(policy.validate(), Err(PolicyError::ApproachingRatio(1.5)));

        policy.action_levels.approaching_ratio = 0.0;
        assert_eq!(policy.validate(), Err(PolicyError::ApproachingRatio(0.0)));
    }

    #[test]
    fn validate_rejects_non_finite_action_level() {
        let mut policy = AssessmentPolicy::default();
        policy.action_levels.lead_ppb = f64::NAN;
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::NotPositive {
                field: "action_levels.lead_ppb",
                ..
            })
        ));
    }
}
