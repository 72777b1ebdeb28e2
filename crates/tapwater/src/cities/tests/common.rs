use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::{AssessmentPolicy, CityKey, CityWaterRecord, WaterSource};
use crate::cities::{
    city_router, CityRecordRepository, RepositoryError, WaterQualityService,
};

pub(super) fn record(state: &str, slug: &str, name: &str) -> CityWaterRecord {
    let mut record = CityWaterRecord::new(state, slug, name);
    record.population = 250_000;
    record.utility_name = Some(format!("{name} Water Department"));
    record.pwsid = Some(format!("{state}0000001"));
    record.primary_source = Some(WaterSource::GroundWater);
    record.hardness_ppm = Some(140.0);
    record.lead_ppb_90th = Some(4.0);
    record
}

pub(super) fn troubled(state: &str, slug: &str, name: &str, health: u32) -> CityWaterRecord {
    let mut record = record(state, slug, name);
    record.violations_total_3yr = health + 2;
    record.violations_health_based_3yr = health;
    record
}

pub(super) fn build_service() -> (WaterQualityService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = WaterQualityService::new(repository.clone(), AssessmentPolicy::default());
    (service, repository)
}

pub(super) fn router_with_service(service: WaterQualityService<MemoryRepository>) -> axum::Router {
    city_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<BTreeMap<CityKey, CityWaterRecord>>>,
}

impl CityRecordRepository for MemoryRepository {
    fn upsert(&self, record: CityWaterRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.key(), record);
        Ok(())
    }

    fn fetch(&self, key: &CityKey) -> Result<Option<CityWaterRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn list_state(&self, state_code: &str) -> Result<Vec<CityWaterRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.state_code == state_code)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<CityWaterRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl CityRecordRepository for UnavailableRepository {
    fn upsert(&self, _record: CityWaterRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("data store offline".to_string()))
    }

    fn fetch(&self, _key: &CityKey) -> Result<Option<CityWaterRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("data store offline".to_string()))
    }

    fn list_state(&self, _state_code: &str) -> Result<Vec<CityWaterRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("data store offline".to_string()))
    }

    fn all(&self) -> Result<Vec<CityWaterRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("data store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
