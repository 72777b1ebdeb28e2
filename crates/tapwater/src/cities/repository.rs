use serde::{Deserialize, Serialize};

use crate::assessment::{CityKey, CityWaterRecord, SafetyVerdict};

/// Storage abstraction over the city data set so the service can run against any store.
pub trait CityRecordRepository: Send + Sync {
    /// Insert or replace the record stored under `record.key()`.
    fn upsert(&self, record: CityWaterRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, key: &CityKey) -> Result<Option<CityWaterRecord>, RepositoryError>;
    fn list_state(&self, state_code: &str) -> Result<Vec<CityWaterRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<CityWaterRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact listing entry for a state's cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySummary {
    pub key: CityKey,
    pub display_name: String,
    pub population_label: String,
    pub verdict: SafetyVerdict,
    pub verdict_label: String,
}
