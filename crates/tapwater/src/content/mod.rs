//! Reader-facing text derived from a city's assessment.
//!
//! Every generator is a pure function of `(record, profile)` so wording can change
//! without touching classification thresholds.

mod descriptions;
mod faq;
pub mod format;
mod snippet;
mod stats;


pub use descriptions::{filter_recommendation, hardness_description, lead_description};
pub use faq::city_faqs;
pub use format::{format_city_name, format_population, format_sample_date, pluralize};
pub use snippet::featured_snippet;
pub use stats::{
    hardness_card, hardness_comparison, lead_card, safety_card, stat_cards,
    state_average_hardness, violations_card, HardnessComparison, StatCard, StatCards, StatStatus,
    US_AVERAGE_HARDNESS_PPM,
};

use serde::{Deserialize, Serialize};

use crate::assessment::{CityKey, CityWaterRecord, WaterQualityProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Everything the presentation layer needs to render one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityReport {
    pub key: CityKey,
    pub display_name: String,
    pub population_label: String,
    pub profile: WaterQualityProfile,
    pub featured_snippet: String,
    pub filter_recommendation: String,
    pub faqs: Vec<FaqItem>,
    pub stat_cards: StatCards,
    pub hardness_comparison: HardnessComparison,
}

pub fn build_report(record: &CityWaterRecord, profile: WaterQualityProfile) -> CityReport {
    CityReport {
        key: record.key(),
        display_name: record.display_name(),
        population_label: format_population(record.population),
        featured_snippet: featured_snippet(record, &profile),
        filter_recommendation: filter_recommendation(record, &profile),
        faqs: city_faqs(record, &profile),
        stat_cards: stat_cards(record, &profile),
        hardness_comparison: hardness_comparison(record),
        profile,
    }
}
