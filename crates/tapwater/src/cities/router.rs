use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::CityRecordRepository;
use super::service::{CityLookup, ServiceError, WaterQualityService};
use crate::assessment::{ppm_to_grains_per_gallon, AssessmentError, CityKey, CityWaterRecord};

const DEFAULT_RANKING_LIMIT: usize = 10;
const MAX_RANKING_LIMIT: usize = 100;

/// Router exposing the assessment engine and the stored city data set.
pub fn city_router<R>(service: Arc<WaterQualityService<R>>) -> Router
where
    R: CityRecordRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<R>))
        .route("/api/v1/hardness", post(hardness_handler::<R>))
        .route("/api/v1/lead", post(lead_handler::<R>))
        .route("/api/v1/cities", put(register_handler::<R>))
        .route("/api/v1/cities/:state", get(state_handler::<R>))
        .route("/api/v1/cities/:state/:slug", get(city_handler::<R>))
        .route("/api/v1/rankings/worst", get(worst_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct HardnessRequest {
    ppm: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeadRequest {
    #[serde(default)]
    reading_ppb: Option<f64>,
    #[serde(default)]
    action_level_ppb: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankingQuery {
    limit: Option<usize>,
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<WaterQualityService<R>>>,
    Json(record): Json<CityWaterRecord>,
) -> Response
where
    R: CityRecordRepository + 'static,
{
    match service.assessor().report(&record) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => unprocessable(&error),
    }
}

pub(crate) async fn hardness_handler<R>(
    State(service): State<Arc<WaterQualityService<R>>>,
    Json(request): Json<HardnessRequest>,
) -> Response
where
    R: CityRecordRepository + 'static,
{
    match service.assessor().classify_hardness(request.ppm) {
        Ok(classification) => {
            let payload = json!({
                "ppm": request.ppm,
                "classification": classification,
                "grains_per_gallon": ppm_to_grains_per_gallon(request.ppm),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => unprocessable(&error),
    }
}

pub(crate) async fn lead_handler<R>(
    State(service): State<Arc<WaterQualityService<R>>>,
    Json(request): Json<LeadRequest>,
) -> Response
where
    R: CityRecordRepository + 'static,
{
    match service
        .assessor()
        .classify_lead(request.reading_ppb, request.action_level_ppb)
    {
        Ok(status) => {
            let payload = json!({
                "status": status,
                "label": status.label(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => unprocessable(&error),
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<WaterQualityService<R>>>,
    Json(record): Json<CityWaterRecord>,
) -> Response
where
    R: CityRecordRepository + 'static,
{
    match service.register(record) {
        Ok(key) => {
            let payload = json!({
                "key": key,
                "path": format!("/api/v1/cities/{}/{}", key.state_code, key.slug),
            });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn state_handler<R>(
    State(service): State<Arc<WaterQualityService<R>>>,
    Path(state): Path<String>,
) -> Response
where
    R: CityRecordRepository + 'static,
{
    match service.state_summaries(&state) {
        Ok(cities) => (StatusCode::OK, Json(cities)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn city_handler<R>(
    State(service): State<Arc<WaterQualityService<R>>>,
    Path((state, slug)): Path<(String, String)>,
) -> Response
where
    R: CityRecordRepository + 'static,
{
    let key = CityKey::new(state, slug);
    match service.report(&key) {
        Ok(lookup @ CityLookup::Available(_)) => (StatusCode::OK, Json(lookup)).into_response(),
        Ok(lookup @ CityLookup::Unavailable { .. }) => {
            (StatusCode::NOT_FOUND, Json(lookup)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn worst_handler<R>(
    State(service): State<Arc<WaterQualityService<R>>>,
    Query(query): Query<RankingQuery>,
) -> Response
where
    R: CityRecordRepository + 'static,
{
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RANKING_LIMIT)
        .min(MAX_RANKING_LIMIT);

    match service.worst_cities(limit) {
        Ok(ranked) => (StatusCode::OK, Json(ranked)).into_response(),
        Err(error) => service_error(error),
    }
}

fn unprocessable(error: &AssessmentError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

fn service_error(error: ServiceError) -> Response {
    match error {
        ServiceError::Assessment(error) => unprocessable(&error),
        ServiceError::Repository(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
