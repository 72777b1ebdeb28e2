//! Drinking-water assessment for EPA city records.
//!
//! The [`assessment`] module classifies hardness and lead/copper readings and
//! walks the prioritized verdict rules; [`content`] turns those results into
//! reader-facing text; [`cities`] exposes the record store contract, the
//! service facade and its HTTP router.

pub mod assessment;
pub mod cities;
pub mod config;
pub mod content;
pub mod error;
pub mod import;
pub mod ranking;
pub mod telemetry;

pub use assessment::{
    ActionLevelStatus, AssessmentError, AssessmentPolicy, CityKey, CityWaterRecord, CopperStatus,
    HardnessClassification, LeadStatus, SafetyAssessment, SafetyVerdict, VerdictRule,
    WaterQualityAssessor, WaterQualityProfile, WaterSource,
};
pub use content::{CityReport, FaqItem};
