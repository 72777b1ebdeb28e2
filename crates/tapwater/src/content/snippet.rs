use crate::assessment::{
    ActionLevelStatus, CityWaterRecord, HardnessClassification, SafetyVerdict, WaterQualityProfile,
};

use super::format::plural_suffix;

/// One-paragraph summary sized for a search featured snippet.
pub fn featured_snippet(record: &CityWaterRecord, profile: &WaterQualityProfile) -> String {
    let city = record.display_name();

    let mut snippet = match profile.safety.verdict {
        SafetyVerdict::Safe => format!(
            "Good news for {city} residents: your tap water meets all federal safety standards."
        ),
        SafetyVerdict::GenerallySafe => format!(
            "{city} tap water is generally safe, though there are a few things worth knowing."
        ),
        SafetyVerdict::Concerns => {
            format!("{city} tap water has some quality concerns you should be aware of.")
        }
        SafetyVerdict::Unsafe => {
            format!("{city} tap water has notable issues that residents should consider.")
        }
    };

    if let (Some(classification), Some(ppm), Some(gpg)) = (
        profile.hardness,
        profile.hardness_ppm,
        profile.grains_per_gallon,
    ) {
        snippet.push_str(&match classification {
            HardnessClassification::VeryHard => format!(
                " At {ppm} ppm ({gpg} gpg), the water is quite hard, so you may notice mineral buildup on fixtures."
            ),
            HardnessClassification::Hard => format!(
                " With {ppm} ppm hardness ({gpg} gpg), expect some mineral deposits over time."
            ),
            HardnessClassification::ModeratelyHard => format!(
                " The water measures {ppm} ppm ({gpg} gpg), moderately hard but manageable for most households."
            ),
            HardnessClassification::Soft => {
                format!(" At just {ppm} ppm ({gpg} gpg), the water is pleasantly soft.")
            }
        });
    }

    match profile.lead {
        ActionLevelStatus::Exceeded => snippet.push_str(
            " Lead levels exceed the EPA action level, and a filter is recommended.",
        ),
        ActionLevelStatus::Warning => {
            snippet.push_str(" Lead levels are approaching federal limits.")
        }
        ActionLevelStatus::Good => {
            snippet.push_str(" Lead levels test well below the EPA action level.")
        }
        ActionLevelStatus::Unknown => {}
    }

    let total = record.violations_total_3yr;
    if total == 0 {
        snippet.push_str(" No violations have been recorded in the past 3 years.");
    } else if total <= 2 {
        snippet.push_str(&format!(
            " Only {total} minor violation{} in the past 3 years.",
            plural_suffix(u64::from(total))
        ));
    } else {
        snippet.push_str(&format!(
            " There have been {total} violations recorded over the past 3 years."
        ));
    }

    snippet
}
