use crate::assessment::{
    ActionLevelStatus, CityWaterRecord, HardnessClassification, SafetyVerdict, WaterQualityProfile,
};

use super::format::format_sample_date;

pub fn hardness_description(classification: Option<HardnessClassification>) -> &'static str {
    match classification {
        None => "Hardness data is not available.",
        Some(HardnessClassification::Soft) => {
            "Soft water requires no treatment and is gentle on skin and appliances."
        }
        Some(HardnessClassification::ModeratelyHard) => {
            "Moderately hard water may cause slight mineral buildup over time."
        }
        Some(HardnessClassification::Hard) => {
            "Hard water can cause scale buildup in pipes and appliances. A water softener may be beneficial."
        }
        Some(HardnessClassification::VeryHard) => {
            "Very hard water causes significant mineral buildup. A water softener is recommended."
        }
    }
}

/// Lead reading against its action level, with the sample date when one is on record.
pub fn lead_description(record: &CityWaterRecord, profile: &WaterQualityProfile) -> String {
    let Some(level) = record.lead_ppb_90th else {
        return "Lead testing data is currently unavailable for this water system.".to_string();
    };
    let action_level = profile.lead_action_level_ppb;

    let mut description = match profile.lead {
        ActionLevelStatus::Exceeded => format!(
            "Lead levels ({level} ppb) exceed the EPA action level of {action_level} ppb. Consider using a NSF-certified lead filter."
        ),
        ActionLevelStatus::Warning => format!(
            "Lead levels ({level} ppb) are approaching the EPA action level of {action_level} ppb. Monitor regularly."
        ),
        ActionLevelStatus::Good | ActionLevelStatus::Unknown => format!(
            "Lead levels ({level} ppb) are below the EPA action level of {action_level} ppb."
        ),
    };

    if let Some(sampled) = record.lead_sample_date {
        description.push_str(&format!(" Last sampled {}.", format_sample_date(sampled)));
    }

    description
}

pub fn filter_recommendation(record: &CityWaterRecord, profile: &WaterQualityProfile) -> String {
    let city = record.display_name();
    let mut parts = Vec::with_capacity(2);

    if profile.safety.verdict == SafetyVerdict::Safe {
        parts.push(format!(
            "{city} tap water meets all EPA standards and is safe to drink without filtration."
        ));
    } else if profile.lead == ActionLevelStatus::Exceeded {
        parts.push(format!(
            "Due to elevated lead levels, a NSF-certified lead filter is recommended for {city}."
        ));
    } else {
        parts.push(format!(
            "Based on recent water quality data, a water filter may be beneficial in {city}."
        ));
    }

    if let (Some(classification), Some(ppm)) = (profile.hardness, record.hardness_ppm) {
        if classification.is_hard() {
            parts.push(format!(
                "The water is {} ({ppm} ppm), so a water softener could reduce scale buildup in pipes and appliances.",
                classification.label().to_lowercase()
            ));
        }
    }

    parts.join(" ")
}
