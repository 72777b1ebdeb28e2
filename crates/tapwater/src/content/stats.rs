//! Headline stat cards: one short value, a status colour and a 0-100 gauge per topic.

use serde::{Deserialize, Serialize};

use crate::assessment::{
    ActionLevelStatus, CityWaterRecord, HardnessClassification, SafetyVerdict, WaterQualityProfile,
};

/// Rough national average used when a state has no published figure.
pub const US_AVERAGE_HARDNESS_PPM: f64 = 100.0;

const STATE_AVERAGE_HARDNESS_PPM: [(&str, f64); 50] = [
    ("AK", 60.0),
    ("AL", 70.0),
    ("AR", 45.0),
    ("AZ", 250.0),
    ("CA", 150.0),
    ("CO", 105.0),
    ("CT", 50.0),
    ("DE", 125.0),
    ("FL", 180.0),
    ("GA", 65.0),
    ("HI", 85.0),
    ("IA", 310.0),
    ("ID", 180.0),
    ("IL", 200.0),
    ("IN", 280.0),
    ("KS", 295.0),
    ("KY", 180.0),
    ("LA", 90.0),
    ("MA", 35.0),
    ("MD", 130.0),
    ("ME", 30.0),
    ("MI", 190.0),
    ("MN", 215.0),
    ("MO", 195.0),
    ("MS", 65.0),
    ("MT", 165.0),
    ("NC", 45.0),
    ("ND", 310.0),
    ("NE", 245.0),
    ("NH", 25.0),
    ("NJ", 110.0),
    ("NM", 200.0),
    ("NV", 285.0),
    ("NY", 85.0),
    ("OH", 220.0),
    ("OK", 175.0),
    ("OR", 30.0),
    ("PA", 140.0),
    ("RI", 45.0),
    ("SC", 40.0),
    ("SD", 280.0),
    ("TN", 120.0),
    ("TX", 170.0),
    ("UT", 220.0),
    ("VA", 95.0),
    ("VT", 35.0),
    ("WA", 55.0),
    ("WI", 280.0),
    ("WV", 160.0),
    ("WY", 205.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatStatus {
    Good,
    Warning,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub status: StatStatus,
    pub status_label: String,
    /// Gauge fill, 0 to 100.
    pub progress: f64,
    pub context: String,
}

impl StatCard {
    fn new(
        label: &str,
        value: impl Into<String>,
        status: StatStatus,
        status_label: impl Into<String>,
        progress: f64,
        context: impl Into<String>,
    ) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            status,
            status_label: status_label.into(),
            progress,
            context: context.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCards {
    pub safety: StatCard,
    pub hardness: StatCard,
    pub lead: StatCard,
    pub violations: StatCard,
}

/// City hardness next to its state's and the national average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardnessComparison {
    pub city_ppm: Option<f64>,
    pub state_average_ppm: f64,
    pub national_average_ppm: f64,
}

pub fn stat_cards(record: &CityWaterRecord, profile: &WaterQualityProfile) -> StatCards {
    StatCards {
        safety: safety_card(record, profile),
        hardness: hardness_card(profile),
        lead: lead_card(record, profile),
        violations: violations_card(record),
    }
}

pub fn safety_card(record: &CityWaterRecord, profile: &WaterQualityProfile) -> StatCard {
    let verdict = profile.safety.verdict;
    let (status, progress) = match verdict {
        SafetyVerdict::Safe => (StatStatus::Good, 95.0),
        SafetyVerdict::GenerallySafe => (StatStatus::Good, 75.0),
        SafetyVerdict::Concerns => (StatStatus::Warning, 50.0),
        SafetyVerdict::Unsafe => (StatStatus::Bad, 25.0),
    };
    let context = if verdict == SafetyVerdict::Safe {
        "No health violations".to_string()
    } else {
        format!(
            "{} health-based violations (3yr)",
            record.violations_health_based_3yr
        )
    };

    StatCard::new(
        "Safety",
        verdict.label(),
        status,
        verdict.label(),
        progress,
        context,
    )
}

pub fn hardness_card(profile: &WaterQualityProfile) -> StatCard {
    let (Some(classification), Some(ppm), Some(gpg)) = (
        profile.hardness,
        profile.hardness_ppm,
        profile.grains_per_gallon,
    ) else {
        return StatCard::new(
            "Hardness",
            "N/A",
            StatStatus::Neutral,
            "No Data",
            0.0,
            "Hardness data unavailable",
        );
    };

    let (status, progress) = match classification {
        HardnessClassification::Soft => (StatStatus::Good, 25.0),
        HardnessClassification::ModeratelyHard => (StatStatus::Neutral, 50.0),
        HardnessClassification::Hard => (StatStatus::Warning, 75.0),
        HardnessClassification::VeryHard => (StatStatus::Bad, 95.0),
    };

    StatCard::new(
        "Hardness",
        format!("{ppm} ppm"),
        status,
        classification.label(),
        progress,
        format!("{gpg} grains per gallon"),
    )
}

pub fn lead_card(record: &CityWaterRecord, profile: &WaterQualityProfile) -> StatCard {
    let Some(level) = record.lead_ppb_90th.filter(|_| profile.lead.is_known()) else {
        return StatCard::new(
            "Lead",
            "N/A",
            StatStatus::Neutral,
            "No Data",
            0.0,
            "Lead testing data unavailable",
        );
    };

    let status = match profile.lead {
        ActionLevelStatus::Exceeded => StatStatus::Bad,
        ActionLevelStatus::Warning => StatStatus::Warning,
        ActionLevelStatus::Good | ActionLevelStatus::Unknown => StatStatus::Good,
    };
    let action_level = profile.lead_action_level_ppb;
    StatCard::new(
        "Lead",
        format!("{level} ppb"),
        status,
        profile.lead.label(),
        (level / action_level * 100.0).min(100.0),
        format!("EPA action level: {action_level} ppb"),
    )
}

/// Active violations outrank everything but a clean record.
pub fn violations_card(record: &CityWaterRecord) -> StatCard {
    let total = record.violations_total_3yr;
    let health = record.violations_health_based_3yr;

    let (status, status_label, progress) = if total == 0 {
        (StatStatus::Good, "Clean Record", 0.0)
    } else if record.has_active_violations {
        (StatStatus::Bad, "Active Violations", 90.0)
    } else if health > 2 {
        (StatStatus::Bad, "Multiple Health Issues", 90.0)
    } else if health > 0 {
        (StatStatus::Warning, "Has Health Violations", 60.0)
    } else {
        (StatStatus::Neutral, "Monitoring Issues Only", 30.0)
    };

    StatCard::new(
        "Violations",
        total.to_string(),
        status,
        status_label,
        progress,
        format!(
            "{health} health-based, {} monitoring (3yr)",
            record.monitoring_violations_3yr()
        ),
    )
}

/// Average hardness for a two-letter state code, falling back to the national figure.
pub fn state_average_hardness(state_code: &str) -> f64 {
    let wanted = state_code.trim().to_ascii_uppercase();
    STATE_AVERAGE_HARDNESS_PPM
        .iter()
        .find(|(code, _)| *code == wanted)
        .map_or(US_AVERAGE_HARDNESS_PPM, |(_, ppm)| *ppm)
}

pub fn hardness_comparison(record: &CityWaterRecord) -> HardnessComparison {
    HardnessComparison {
        city_ppm: record.hardness_ppm,
        state_average_ppm: state_average_hardness(&record.state_code),
        national_average_ppm: US_AVERAGE_HARDNESS_PPM,
    }
}
