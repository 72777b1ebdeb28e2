//! City data set: the record store contract, the service facade and its HTTP router.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{CityRecordRepository, CitySummary, RepositoryError};
pub use router::city_router;
pub use service::{CityLookup, ServiceError, WaterQualityService};
