use crate::assessment::{CityWaterRecord, WaterQualityAssessor};

pub(super) fn assessor() -> WaterQualityAssessor {
    WaterQualityAssessor::default()
}

/// Single-system city with no samples and no violations.
pub(super) fn record(name: &str) -> CityWaterRecord {
    let slug = name.to_ascii_lowercase().replace(' ', "-");
    let mut record = CityWaterRecord::new("CA", slug, name);
    record.population = 500_000;
    record
}

pub(super) fn with_violations(name: &str, total: u32, health_based: u32) -> CityWaterRecord {
    let mut record = record(name);
    record.violations_total_3yr = total;
    record.violations_health_based_3yr = health_based;
    record
}
