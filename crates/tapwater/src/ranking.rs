//! Concern ranking across many cities.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::assessment::{
    ActionLevelStatus, AssessmentError, CityKey, CityWaterRecord, SafetyVerdict,
    WaterQualityAssessor,
};

const TOTAL_VIOLATION_WEIGHT: u64 = 10;
const HEALTH_VIOLATION_WEIGHT: u64 = 25;
const LEAD_EXCEEDED_PENALTY: u64 = 50;
const LEAD_WARNING_PENALTY: u64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCity {
    pub key: CityKey,
    pub display_name: String,
    pub population: u64,
    pub score: u64,
    pub verdict: SafetyVerdict,
    pub lead: ActionLevelStatus,
}

/// Weighted concern score; zero means nothing worth listing.
pub fn concern_score(
    assessor: &WaterQualityAssessor,
    record: &CityWaterRecord,
) -> Result<u64, AssessmentError> {
    let lead = assessor.classify_lead(record.lead_ppb_90th, record.lead_action_level_ppb)?;
    Ok(weighted_score(record, lead))
}

fn weighted_score(record: &CityWaterRecord, lead: ActionLevelStatus) -> u64 {
    let lead_penalty = match lead {
        ActionLevelStatus::Exceeded => LEAD_EXCEEDED_PENALTY,
        ActionLevelStatus::Warning => LEAD_WARNING_PENALTY,
        ActionLevelStatus::Good | ActionLevelStatus::Unknown => 0,
    };

    u64::from(record.violations_total_3yr) * TOTAL_VIOLATION_WEIGHT
        + u64::from(record.violations_health_based_3yr) * HEALTH_VIOLATION_WEIGHT
        + lead_penalty
}

/// Highest-concern cities first. Records that fail assessment are skipped, and a city
/// listed more than once keeps only its highest-scoring entry.
pub fn rank_by_concern<'a, I>(
    assessor: &WaterQualityAssessor,
    records: I,
    limit: usize,
) -> Vec<RankedCity>
where
    I: IntoIterator<Item = &'a CityWaterRecord>,
{
    let mut ranked: Vec<RankedCity> = records
        .into_iter()
        .filter_map(|record| match rank_one(assessor, record) {
            Ok(ranked) => ranked,
            Err(err) => {
                warn!(city = %record.key(), error = %err, "skipping record in concern ranking");
                None
            }
        })
        .collect();

    ranked.sort_by(compare_concern);

    let mut seen = HashSet::new();
    ranked.retain(|city| seen.insert(city.key.clone()));
    ranked.truncate(limit);
    ranked
}

fn rank_one(
    assessor: &WaterQualityAssessor,
    record: &CityWaterRecord,
) -> Result<Option<RankedCity>, AssessmentError> {
    let profile = assessor.profile(record)?;
    let score = weighted_score(record, profile.lead);
    if score == 0 {
        return Ok(None);
    }

    Ok(Some(RankedCity {
        key: record.key(),
        display_name: record.display_name(),
        population: record.population,
        score,
        verdict: profile.safety.verdict,
        lead: profile.lead,
    }))
}

fn compare_concern(left: &RankedCity, right: &RankedCity) -> Ordering {
    right
        .score
        .cmp(&left.score)
        .then_with(|| right.population.cmp(&left.population))
        .then_with(|| left.key.cmp(&right.key))
}
