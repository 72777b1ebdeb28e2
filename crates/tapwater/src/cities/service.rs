use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::repository::{CityRecordRepository, CitySummary, RepositoryError};
use crate::assessment::validation::validate_identity;
use crate::assessment::{
    AssessmentError, AssessmentPolicy, CityKey, CityWaterRecord, WaterQualityAssessor,
};
use crate::content::{format_population, CityReport};
use crate::ranking::{rank_by_concern, RankedCity};

/// Result of looking a city up. A missing record is reported as unavailable rather
/// than replaced by a guessed verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CityLookup {
    Available(Box<CityReport>),
    Unavailable { key: CityKey },
}

/// Service composing the record repository with the assessment engine.
pub struct WaterQualityService<R> {
    repository: Arc<R>,
    assessor: Arc<WaterQualityAssessor>,
}

impl<R> WaterQualityService<R>
where
    R: CityRecordRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: AssessmentPolicy) -> Self {
        Self::with_assessor(repository, Arc::new(WaterQualityAssessor::new(policy)))
    }

    pub fn with_assessor(repository: Arc<R>, assessor: Arc<WaterQualityAssessor>) -> Self {
        Self {
            repository,
            assessor,
        }
    }

    pub fn assessor(&self) -> &WaterQualityAssessor {
        &self.assessor
    }

    /// Validate and store a record under its normalized key.
    pub fn register(&self, mut record: CityWaterRecord) -> Result<CityKey, ServiceError> {
        validate_identity(&record).map_err(AssessmentError::from)?;
        self.assessor.assess(&record)?;

        let key = record.key();
        record.state_code = key.state_code.clone();
        record.slug = key.slug.clone();
        self.repository.upsert(record)?;

        debug!(city = %key, "registered city record");
        Ok(key)
    }

    /// Register every record, stopping at the first one that fails.
    pub fn register_all<I>(&self, records: I) -> Result<usize, ServiceError>
    where
        I: IntoIterator<Item = CityWaterRecord>,
    {
        let mut registered = 0;
        for record in records {
            self.register(record)?;
            registered += 1;
        }

        info!(registered, "loaded city records");
        Ok(registered)
    }

    pub fn report(&self, key: &CityKey) -> Result<CityLookup, ServiceError> {
        let Some(record) = self.repository.fetch(key)? else {
            return Ok(CityLookup::Unavailable { key: key.clone() });
        };

        let report = self.assessor.report(&record)?;
        Ok(CityLookup::Available(Box::new(report)))
    }

    /// Cities of one state, most populous first.
    pub fn state_summaries(&self, state_code: &str) -> Result<Vec<CitySummary>, ServiceError> {
        let state_code = state_code.trim().to_ascii_uppercase();
        let mut records = self.repository.list_state(&state_code)?;
        records.sort_by(|left, right| {
            right
                .population
                .cmp(&left.population)
                .then_with(|| left.slug.cmp(&right.slug))
        });

        records
            .iter()
            .map(|record| {
                let safety = self.assessor.assess(record)?;
                Ok(CitySummary {
                    key: record.key(),
                    display_name: record.display_name(),
                    population_label: format_population(record.population),
                    verdict: safety.verdict,
                    verdict_label: safety.verdict.label().to_string(),
                })
            })
            .collect()
    }

    pub fn worst_cities(&self, limit: usize) -> Result<Vec<RankedCity>, ServiceError> {
        let records = self.repository.all()?;
        Ok(rank_by_concern(&self.assessor, &records, limit))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
