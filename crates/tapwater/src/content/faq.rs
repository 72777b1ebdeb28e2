use crate::assessment::{
    ActionLevelStatus, CityWaterRecord, SafetyVerdict, WaterQualityProfile, WaterSource,
};

use super::descriptions::{filter_recommendation, hardness_description, lead_description};
use super::format::{plural_suffix, pluralize};
use super::FaqItem;

/// Question/answer pairs for one city, in display order. Questions whose data is
/// missing (hardness, utility, source) are left out rather than answered with blanks.
pub fn city_faqs(record: &CityWaterRecord, profile: &WaterQualityProfile) -> Vec<FaqItem> {
    let city = record.display_name();
    let mut faqs = Vec::with_capacity(8);

    faqs.push(FaqItem::new(
        format!("Is {city} tap water safe to drink?"),
        safety_answer(&city, profile),
    ));

    if let (Some(classification), Some(ppm), Some(gpg)) = (
        profile.hardness,
        profile.hardness_ppm,
        profile.grains_per_gallon,
    ) {
        faqs.push(FaqItem::new(
            format!("How hard is {city} water?"),
            format!(
                "{city} has {} water with a hardness of {ppm} ppm ({gpg} grains per gallon). {}",
                classification.label().to_lowercase(),
                hardness_description(Some(classification))
            ),
        ));
    }

    faqs.push(FaqItem::new(
        format!("Does {city} water have lead?"),
        lead_description(record, profile),
    ));

    if let Some(utility) = record.utility_name.as_deref() {
        let mut answer = format!("{city}'s tap water is provided by {utility}.");
        if let Some(pwsid) = record.pwsid.as_deref() {
            answer.push_str(&format!(" The EPA system ID (PWSID) is {pwsid}."));
        }
        if let Some(source) = record.primary_source {
            answer.push_str(&format!(" The primary water source is {}.", source.label()));
        }
        answer.push_str(
            " You can find official water quality reports and contact information through your local utility.",
        );
        faqs.push(FaqItem::new(
            format!("Who provides {city}'s tap water?"),
            answer,
        ));
    }

    faqs.push(FaqItem::new(
        format!("Do I need a water filter in {city}?"),
        filter_recommendation(record, profile),
    ));

    faqs.push(FaqItem::new(
        format!("What violations has {city}'s water utility had?"),
        violations_answer(&city, record),
    ));

    faqs.push(FaqItem::new(
        format!("Why does {city} tap water taste like chlorine?"),
        format!(
            "{city}'s water utility uses chlorine or chloramine to disinfect the water supply. \
             This is a safe and common practice required by the EPA. The taste is usually more \
             noticeable in warm weather or near treatment facilities. To reduce chlorine taste, \
             let water sit in an open pitcher for 30 minutes, use a refrigerator filter, or install \
             a carbon filter on your tap."
        ),
    ));

    if let Some(source) = record.primary_source {
        let explanation = match source {
            WaterSource::SurfaceWater => {
                "Surface water is collected from rivers, lakes, and reservoirs, then treated before distribution."
            }
            WaterSource::GroundWater => {
                "Ground water is pumped from underground aquifers, which is naturally filtered through soil and rock."
            }
            _ => {
                "The water undergoes treatment at local facilities before being distributed through the municipal water system."
            }
        };
        let mut answer = format!(
            "{city}'s tap water primarily comes from {} sources. {explanation}",
            source.label().to_lowercase()
        );
        if let Some(utility) = record.utility_name.as_deref() {
            answer.push_str(&format!(" The water is provided by {utility}."));
        }
        faqs.push(FaqItem::new(
            format!("Where does {city} get its water from?"),
            answer,
        ));
    }

    faqs
}

fn safety_answer(city: &str, profile: &WaterQualityProfile) -> String {
    match profile.safety.verdict {
        SafetyVerdict::Safe => {
            let lead = match profile.lead {
                ActionLevelStatus::Good => format!(
                    " Lead levels are below the EPA action level of {} ppb.",
                    profile.lead_action_level_ppb
                ),
                ActionLevelStatus::Warning => format!(
                    " Lead levels are within, but approaching, the EPA action level of {} ppb.",
                    profile.lead_action_level_ppb
                ),
                ActionLevelStatus::Exceeded | ActionLevelStatus::Unknown => String::new(),
            };
            format!(
                "Yes, {city} tap water is safe to drink. The water meets all EPA standards with no health-based violations in the past 3 years.{lead}"
            )
        }
        SafetyVerdict::GenerallySafe => format!(
            "{city} tap water is generally safe to drink with minor compliance issues. \
             While there may be some monitoring violations, there are no significant health-based concerns. \
             The water meets EPA safety standards."
        ),
        SafetyVerdict::Concerns => format!(
            "{city} tap water has some quality concerns but remains within acceptable EPA limits. \
             You may want to consider using a water filter, especially for drinking water. \
             Check the detailed report for specific contaminant levels."
        ),
        SafetyVerdict::Unsafe => format!(
            "{city} tap water has significant quality issues. \
             We recommend using filtered or bottled water for drinking until issues are resolved. \
             Contact your local water utility for more information."
        ),
    }
}

fn violations_answer(city: &str, record: &CityWaterRecord) -> String {
    let total = record.violations_total_3yr;
    if total == 0 {
        return format!(
            "{city}'s water utility has had no violations in the past 3 years, indicating excellent compliance with EPA drinking water regulations."
        );
    }

    let health = record.violations_health_based_3yr;
    let monitoring = record.monitoring_violations_3yr();
    format!(
        "{city}'s water utility has had {total} violation{} in the past 3 years. \
         Of these, {health} {} health-based and {monitoring} {} monitoring/reporting related.",
        plural_suffix(u64::from(total)),
        pluralize(u64::from(health), "was", "were"),
        pluralize(u64::from(monitoring), "was", "were"),
    )
}
