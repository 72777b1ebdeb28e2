use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tapwater::assessment::{CityKey, CityWaterRecord, WaterSource};
use tapwater::cities::{CityRecordRepository, RepositoryError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local city store backing the HTTP service.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCityRepository {
    records: Arc<Mutex<BTreeMap<CityKey, CityWaterRecord>>>,
}

impl InMemoryCityRepository {
    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<CityKey, CityWaterRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("city store lock poisoned".to_string()))
    }
}

impl CityRecordRepository for InMemoryCityRepository {
    fn upsert(&self, record: CityWaterRecord) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        guard.insert(record.key(), record);
        Ok(())
    }

    fn fetch(&self, key: &CityKey) -> Result<Option<CityWaterRecord>, RepositoryError> {
        let guard = self.guard()?;
        Ok(guard.get(key).cloned())
    }

    fn list_state(&self, state_code: &str) -> Result<Vec<CityWaterRecord>, RepositoryError> {
        let guard = self.guard()?;
        Ok(guard
            .iter()
            .filter(|(key, _)| key.state_code == state_code)
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn all(&self) -> Result<Vec<CityWaterRecord>, RepositoryError> {
        let guard = self.guard()?;
        Ok(guard.values().cloned().collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_source(raw: &str) -> Result<WaterSource, String> {
    WaterSource::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = WaterSource::ordered()
            .into_iter()
            .map(WaterSource::label)
            .collect();
        format!("unknown water source '{raw}' (expected one of: {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, slug: &str, population: u64) -> CityWaterRecord {
        let mut record = CityWaterRecord::new(state, slug, slug.to_uppercase());
        record.population = population;
        record
    }

    #[test]
    fn upsert_replaces_records_with_the_same_key() {
        let repository = InMemoryCityRepository::default();
        repository.upsert(record("OR", "bend", 99_178)).unwrap();
        repository.upsert(record("OR", "bend", 100_000)).unwrap();

        let stored = repository
            .fetch(&CityKey::new("OR", "bend"))
            .unwrap()
            .expect("record stored");
        assert_eq!(stored.population, 100_000);
        assert_eq!(repository.all().unwrap().len(), 1);
    }

    #[test]
    fn list_state_filters_by_state_code() {
        let repository = InMemoryCityRepository::default();
        repository.upsert(record("OR", "bend", 99_178)).unwrap();
        repository.upsert(record("OR", "salem", 175_535)).unwrap();
        repository.upsert(record("WA", "spokane", 228_989)).unwrap();

        let oregon = repository.list_state("OR").unwrap();
        assert_eq!(oregon.len(), 2);
        assert!(oregon.iter().all(|record| record.state_code == "OR"));
        assert!(repository
            .fetch(&CityKey::new("OR", "portland"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn poisoned_store_reports_unavailable() {
        let repository = InMemoryCityRepository::default();
        let records = repository.records.clone();
        let _ = std::thread::spawn(move || {
            let _guard = records.lock().unwrap();
            panic!("poison the city store");
        })
        .join();

        assert!(matches!(
            repository.all(),
            Err(RepositoryError::Unavailable(_))
        ));
    }

    #[test]
    fn parse_date_reports_expected_format() {
        assert_eq!(
            parse_date(" 2023-12-31 "),
            Ok(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
        );
        let error = parse_date("12/31/2023").unwrap_err();
        assert!(error.contains("YYYY-MM-DD"));
    }

    #[test]
    fn parse_source_lists_known_sources() {
        assert_eq!(parse_source("ground_water"), Ok(WaterSource::GroundWater));
        let error = parse_source("rain").unwrap_err();
        assert!(error.contains("Purchased Surface Water"));
    }
}
