use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use super::normalizer::{clean_text, slugify, state_code};
use super::ImportError;
use crate::assessment::{CityWaterRecord, WaterSource};

/// One data row with the line number it came from (the header is line 1).
#[derive(Debug)]
pub(crate) struct ParsedRow {
    pub(crate) line: usize,
    pub(crate) record: CityWaterRecord,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, row) in csv_reader.deserialize::<CityRow>().enumerate() {
        let line = index + 2;
        let record = row?.into_record(line)?;
        rows.push(ParsedRow { line, record });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CityRow {
    #[serde(alias = "state")]
    state_code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    slug: Option<String>,
    #[serde(alias = "city")]
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    county: Option<String>,
    population: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    water_system_count: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    utility_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pwsid: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    primary_source: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hardness_ppm: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lead_ppb_90th: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lead_action_level_ppb: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    copper_ppm_90th: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    copper_action_level_ppm: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lead_sample_date: Option<String>,
    violations_total_3yr: String,
    violations_health_based_3yr: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_active_violations: Option<String>,
}

impl CityRow {
    fn into_record(self, line: usize) -> Result<CityWaterRecord, ImportError> {
        let field = FieldParser { line };
        let name = clean_text(&self.name);
        let slug = match self.slug.as_deref() {
            Some(slug) => slugify(slug),
            None => slugify(&name),
        };

        let mut record = CityWaterRecord::new(state_code(&self.state_code), slug, name);
        record.county = self.county.as_deref().map(clean_text);
        record.population = field.number("population", &self.population)?;
        if let Some(count) = self.water_system_count.as_deref() {
            record.water_system_count = field.number("water_system_count", count)?;
        }
        record.utility_name = self.utility_name.as_deref().map(clean_text);
        record.pwsid = self.pwsid.as_deref().map(clean_text);
        record.primary_source = self
            .primary_source
            .as_deref()
            .map(|raw| {
                WaterSource::from_label(raw).ok_or_else(|| field.invalid("primary_source", raw))
            })
            .transpose()?;
        record.hardness_ppm = field.optional_number("hardness_ppm", &self.hardness_ppm)?;
        record.lead_ppb_90th = field.optional_number("lead_ppb_90th", &self.lead_ppb_90th)?;
        record.lead_action_level_ppb =
            field.optional_number("lead_action_level_ppb", &self.lead_action_level_ppb)?;
        record.copper_ppm_90th = field.optional_number("copper_ppm_90th", &self.copper_ppm_90th)?;
        record.copper_action_level_ppm =
            field.optional_number("copper_action_level_ppm", &self.copper_action_level_ppm)?;
        record.lead_sample_date = self
            .lead_sample_date
            .as_deref()
            .map(|raw| parse_date(raw).ok_or_else(|| field.invalid("lead_sample_date", raw)))
            .transpose()?;
        record.violations_total_3yr =
            field.number("violations_total_3yr", &self.violations_total_3yr)?;
        record.violations_health_based_3yr =
            field.number("violations_health_based_3yr", &self.violations_health_based_3yr)?;
        if let Some(raw) = self.has_active_violations.as_deref() {
            record.has_active_violations =
                parse_flag(raw).ok_or_else(|| field.invalid("has_active_violations", raw))?;
        }

        Ok(record)
    }
}

struct FieldParser {
    line: usize,
}

impl FieldParser {
    fn number<T: FromStr>(&self, name: &'static str, raw: &str) -> Result<T, ImportError> {
        raw.trim()
            .replace(',', "")
            .parse()
            .map_err(|_| self.invalid(name, raw))
    }

    fn optional_number<T: FromStr>(
        &self,
        name: &'static str,
        raw: &Option<String>,
    ) -> Result<Option<T>, ImportError> {
        raw.as_deref().map(|raw| self.number(name, raw)).transpose()
    }

    fn invalid(&self, field: &'static str, raw: &str) -> ImportError {
        ImportError::InvalidField {
            line: self.line,
            field,
            value: raw.to_string(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").ok()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
