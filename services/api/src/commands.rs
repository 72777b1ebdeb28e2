use crate::infra::{parse_date, parse_source};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use tapwater::assessment::{CityWaterRecord, WaterQualityAssessor, WaterSource};
use tapwater::config::AppConfig;
use tapwater::error::AppError;
use tapwater::import::{slugify, CityRecordImporter};
use tapwater::ranking::{rank_by_concern, RankedCity};
use tapwater::{CityReport, SafetyAssessment};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// City name as published by the EPA (UPPER CASE is fine)
    #[arg(long)]
    pub(crate) name: String,
    /// Two-letter state code
    #[arg(long)]
    pub(crate) state: String,
    /// URL slug (derived from the name when omitted)
    #[arg(long)]
    pub(crate) slug: Option<String>,
    #[arg(long)]
    pub(crate) county: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub(crate) population: u64,
    /// Number of public water systems serving the city
    #[arg(long, default_value_t = 1)]
    pub(crate) systems: u32,
    #[arg(long)]
    pub(crate) utility: Option<String>,
    #[arg(long)]
    pub(crate) pwsid: Option<String>,
    /// Primary source, e.g. "surface-water" or "Purchased Ground Water"
    #[arg(long, value_parser = parse_source)]
    pub(crate) source: Option<WaterSource>,
    /// Hardness in ppm (mg/L as CaCO3)
    #[arg(long)]
    pub(crate) hardness: Option<f64>,
    /// 90th percentile lead reading in ppb
    #[arg(long)]
    pub(crate) lead: Option<f64>,
    /// Lead action level in ppb (defaults to the configured policy)
    #[arg(long)]
    pub(crate) lead_action_level: Option<f64>,
    /// 90th percentile copper reading in ppm
    #[arg(long)]
    pub(crate) copper: Option<f64>,
    #[arg(long)]
    pub(crate) copper_action_level: Option<f64>,
    /// Lead and Copper Rule sample date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) sampled: Option<NaiveDate>,
    /// Violations of any kind in the last three years
    #[arg(long, default_value_t = 0)]
    pub(crate) violations: u32,
    /// Health-based violations in the last three years
    #[arg(long, default_value_t = 0)]
    pub(crate) health_violations: u32,
    #[arg(long)]
    pub(crate) active_violations: bool,
    /// Print the generated FAQ entries as well
    #[arg(long)]
    pub(crate) faq: bool,
}

impl AssessArgs {
    fn into_record(self) -> CityWaterRecord {
        let slug = self.slug.unwrap_or_else(|| slugify(&self.name));
        let mut record = CityWaterRecord::new(self.state.trim().to_ascii_uppercase(), slug, self.name);
        record.county = self.county;
        record.population = self.population;
        record.water_system_count = self.systems;
        record.utility_name = self.utility;
        record.pwsid = self.pwsid;
        record.primary_source = self.source;
        record.hardness_ppm = self.hardness;
        record.lead_ppb_90th = self.lead;
        record.lead_action_level_ppb = self.lead_action_level;
        record.copper_ppm_90th = self.copper;
        record.copper_action_level_ppm = self.copper_action_level;
        record.lead_sample_date = self.sampled;
        record.violations_total_3yr = self.violations;
        record.violations_health_based_3yr = self.health_violations;
        record.has_active_violations = self.active_violations;
        record
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// City CSV export, one city per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Also list the N cities of highest concern
    #[arg(long)]
    pub(crate) worst: Option<usize>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let assessor = configured_assessor()?;
    let include_faq = args.faq;
    let record = args.into_record();
    let report = assessor.report(&record)?;

    for line in report_lines(&report, include_faq) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let assessor = configured_assessor()?;
    let records = CityRecordImporter::from_path(&args.csv, &assessor)?;

    println!("Assessed {} cities from {}", records.len(), args.csv.display());
    for record in &records {
        let assessment = assessor.assess(record)?;
        println!("{}", verdict_line(record, &assessment));
    }

    if let Some(limit) = args.worst {
        let ranked = rank_by_concern(&assessor, &records, limit);
        println!("\nHighest concern");
        if ranked.is_empty() {
            println!("- No city has violations or elevated lead on record");
        }
        for line in ranking_lines(&ranked) {
            println!("{line}");
        }
    }
    Ok(())
}

fn configured_assessor() -> Result<WaterQualityAssessor, AppError> {
    let config = AppConfig::load()?;
    Ok(WaterQualityAssessor::new(config.assessment.policy))
}

pub(crate) fn report_lines(report: &CityReport, include_faq: bool) -> Vec<String> {
    let profile = &report.profile;
    let safety = &profile.safety;
    let mut lines = vec![
        format!(
            "{} ({}) | population {}",
            report.display_name, report.key, report.population_label
        ),
        format!(
            "Verdict: {} [{}]",
            safety.verdict.label(),
            safety.rule.as_str()
        ),
        format!("  {}", safety.summary),
    ];
    lines.extend(safety.details.iter().map(|detail| format!("  - {detail}")));

    lines.push(
        match (profile.hardness, profile.hardness_ppm, profile.grains_per_gallon) {
            (Some(class), Some(ppm), Some(gpg)) => {
                format!("Hardness: {} ({ppm:.0} ppm, {gpg:.1} gpg)", class.label())
            }
            _ => "Hardness: no data".to_string(),
        },
    );
    lines.push(format!(
        "Lead: {} (action level {} ppb)",
        profile.lead.label(),
        profile.lead_action_level_ppb
    ));
    lines.push(format!("Copper: {}", profile.copper.label()));
    let violations = &report.stat_cards.violations;
    lines.push(format!(
        "Violations: {} ({}) | {}",
        violations.value, violations.status_label, violations.context
    ));
    lines.push(String::new());
    lines.push(report.featured_snippet.clone());
    lines.push(format!("Filter: {}", report.filter_recommendation));

    if include_faq {
        lines.push(String::new());
        lines.push("Frequently asked questions".to_string());
        for item in &report.faqs {
            lines.push(format!("Q: {}", item.question));
            lines.push(format!("A: {}", item.answer));
        }
    }
    lines
}

pub(crate) fn verdict_line(record: &CityWaterRecord, assessment: &SafetyAssessment) -> String {
    format!(
        "- {} ({}): {} | {}",
        record.display_name(),
        record.key(),
        assessment.verdict.label(),
        assessment.summary
    )
}

pub(crate) fn ranking_lines(ranked: &[RankedCity]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, city)| {
            format!(
                "{:>2}. {} ({}) score {} | {} | lead {}",
                index + 1,
                city.display_name,
                city.key,
                city.score,
                city.verdict.label(),
                city.lead.label()
            )
        })
        .collect()
}
