use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::format::format_city_name;

/// Lookup key for a city record: two-letter state code plus URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityKey {
    pub state_code: String,
    pub slug: String,
}

impl CityKey {
    pub fn new(state_code: impl AsRef<str>, slug: impl AsRef<str>) -> Self {
        Self {
            state_code: state_code.as_ref().trim().to_ascii_uppercase(),
            slug: slug.as_ref().trim().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.state_code, self.slug)
    }
}

/// Primary source reported for the city's main water system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterSource {
    #[serde(rename = "Surface Water")]
    SurfaceWater,
    #[serde(rename = "Ground Water")]
    GroundWater,
    #[serde(rename = "Purchased Surface Water")]
    PurchasedSurfaceWater,
    #[serde(rename = "Purchased Ground Water")]
    PurchasedGroundWater,
    Other,
}

impl WaterSource {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::SurfaceWater,
            Self::GroundWater,
            Self::PurchasedSurfaceWater,
            Self::PurchasedGroundWater,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SurfaceWater => "Surface Water",
            Self::GroundWater => "Ground Water",
            Self::PurchasedSurfaceWater => "Purchased Surface Water",
            Self::PurchasedGroundWater => "Purchased Ground Water",
            Self::Other => "Other",
        }
    }

    /// Accepts the display label or a kebab/snake spelling (`ground-water`).
    pub fn from_label(raw: &str) -> Option<Self> {
        let wanted: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ordered().into_iter().find(|source| {
            let label: String = source
                .label()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            label == wanted
        })
    }
}

/// Per-city water quality input as published by the EPA data pipeline.
///
/// Readings that were never sampled stay `None`; they must never be read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWaterRecord {
    pub state_code: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub county: Option<String>,
    pub population: u64,
    #[serde(default = "default_water_system_count")]
    pub water_system_count: u32,
    #[serde(default)]
    pub utility_name: Option<String>,
    #[serde(default)]
    pub pwsid: Option<String>,
    #[serde(default)]
    pub primary_source: Option<WaterSource>,
    /// mg/L as CaCO3.
    #[serde(default)]
    pub hardness_ppm: Option<f64>,
    #[serde(default)]
    pub lead_ppb_90th: Option<f64>,
    /// Falls back to the policy's lead action level when absent.
    #[serde(default)]
    pub lead_action_level_ppb: Option<f64>,
    #[serde(default)]
    pub copper_ppm_90th: Option<f64>,
    #[serde(default)]
    pub copper_action_level_ppm: Option<f64>,
    #[serde(default)]
    pub lead_sample_date: Option<NaiveDate>,
    pub violations_total_3yr: u32,
    pub violations_health_based_3yr: u32,
    #[serde(default)]
    pub has_active_violations: bool,
}

fn default_water_system_count() -> u32 {
    1
}

impl CityWaterRecord {
    /// Record with no samples, no violations and a single water system.
    pub fn new(state_code: impl Into<String>, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            state_code: state_code.into(),
            slug: slug.into(),
            name: name.into(),
            county: None,
            population: 0,
            water_system_count: default_water_system_count(),
            utility_name: None,
            pwsid: None,
            primary_source: None,
            hardness_ppm: None,
            lead_ppb_90th: None,
            lead_action_level_ppb: None,
            copper_ppm_90th: None,
            copper_action_level_ppm: None,
            lead_sample_date: None,
            violations_total_3yr: 0,
            violations_health_based_3yr: 0,
            has_active_violations: false,
        }
    }

    pub fn key(&self) -> CityKey {
        CityKey::new(&self.state_code, &self.slug)
    }

    pub fn display_name(&self) -> String {
        format_city_name(&self.name)
    }

    /// Monitoring/reporting violations: everything that is not health based.
    pub fn monitoring_violations_3yr(&self) -> u32 {
        self.violations_total_3yr
            .saturating_sub(self.violations_health_based_3yr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_key_normalizes_case_and_whitespace() {
        let key = CityKey::new(" ca ", "San-Francisco ");
        assert_eq!(key.state_code, "CA");
        assert_eq!(key.slug, "san-francisco");
        assert_eq!(key.to_string(), "CA/san-francisco");
    }

    #[test]
    fn water_source_parses_labels_and_slugs() {
        assert_eq!(
            WaterSource::from_label("Surface Water"),
            Some(WaterSource::SurfaceWater)
        );
        assert_eq!(
            WaterSource::from_label("purchased-ground-water"),
            Some(WaterSource::PurchasedGroundWater)
        );
        assert_eq!(WaterSource::from_label("aquifer"), None);
    }

    #[test]
    fn record_deserializes_with_defaults() {
        let record: CityWaterRecord = serde_json::from_str(
            r#"{
                "state_code": "TX",
                "slug": "austin",
                "name": "AUSTIN",
                "population": 961855,
                "hardness_ppm": 180.0,
                "violations_total_3yr": 4,
                "violations_health_based_3yr": 1
            }"#,
        )
        .expect("record parses");

        assert_eq!(record.water_system_count, 1);
        assert!(record.lead_ppb_90th.is_none());
        assert!(record.lead_action_level_ppb.is_none());
        assert_eq!(record.monitoring_violations_3yr(), 3);
        assert_eq!(record.display_name(), "Austin");
        assert_eq!(record.key(), CityKey::new("TX", "austin"));
    }

    #[test]
    fn negative_counts_are_rejected_at_the_wire() {
        let parsed = serde_json::from_str::<CityWaterRecord>(
            r#"{
                "state_code": "TX",
                "slug": "austin",
                "name": "Austin",
                "population": 1,
                "violations_total_3yr": -2,
                "violations_health_based_3yr": 0
            }"#,
        );
        assert!(parsed.is_err());
    }
}
