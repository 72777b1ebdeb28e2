use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::assessment::AssessmentPolicy;
use crate::cities::router::{city_handler, register_handler};
use crate::cities::WaterQualityService;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn assessment_route_returns_report() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let body = serde_json::to_value(record("CO", "denver", "DENVER")).unwrap();
    let response = router
        .oneshot(json_request("POST", "/api/v1/assessments", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["display_name"], "Denver");
    assert_eq!(payload["profile"]["safety"]["verdict"], "safe");
    assert_eq!(payload["profile"]["hardness"], "Hard");
    assert_eq!(payload["profile"]["lead"], "good");
}

#[tokio::test]
async fn assessment_route_rejects_inconsistent_counts() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let mut record = record("CO", "denver", "Denver");
    record.violations_total_3yr = 1;
    record.violations_health_based_3yr = 2;
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/assessments",
            serde_json::to_value(record).unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap()
        .contains("exceed total violations"));
}

#[tokio::test]
async fn hardness_route_classifies_and_converts() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("POST", "/api/v1/hardness", json!({ "ppm": 171.0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["classification"], "Hard");
    assert_eq!(payload["grains_per_gallon"], 10.0);
}

#[tokio::test]
async fn hardness_route_rejects_negative_readings() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("POST", "/api/v1/hardness", json!({ "ppm": -3.0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn lead_route_reports_unknown_without_reading() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/lead", json!({})))
        .await
        .unwrap();
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "unknown");
    assert_eq!(payload["label"], "No Data");

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/lead",
            json!({ "reading_ppb": 16.0 }),
        ))
        .await
        .unwrap();
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "exceeded");
}

#[tokio::test]
async fn registered_city_is_served_back() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/cities",
            serde_json::to_value(record("ia", "Ames", "Ames")).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["path"], "/api/v1/cities/IA/ames");

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/cities/IA/ames")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "available");
    assert_eq!(payload["key"]["slug"], "ames");

    let response = router
        .oneshot(Request::get("/api/v1/cities/ia").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_city_reports_unavailable() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/cities/IA/atlantis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "unavailable");
    assert_eq!(payload["key"]["state_code"], "IA");
}

#[tokio::test]
async fn worst_route_honors_limit() {
    let (service, _) = build_service();
    service
        .register_all(vec![
            troubled("MI", "flint", "Flint", 6),
            troubled("MI", "detroit", "Detroit", 3),
            troubled("MI", "lansing", "Lansing", 1),
        ])
        .unwrap();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/rankings/worst?limit=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let slugs: Vec<&str> = payload
        .as_array()
        .unwrap()
        .iter()
        .map(|city| city["key"]["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["flint", "detroit"]);
}

#[tokio::test]
async fn register_handler_maps_repository_failure_to_server_error() {
    let service = Arc::new(WaterQualityService::new(
        Arc::new(UnavailableRepository),
        AssessmentPolicy::default(),
    ));

    let response = register_handler::<UnavailableRepository>(
        State(service),
        axum::Json(record("IA", "ames", "Ames")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn city_handler_maps_repository_failure_to_server_error() {
    let service = Arc::new(WaterQualityService::new(
        Arc::new(UnavailableRepository),
        AssessmentPolicy::default(),
    ));

    let response = city_handler::<UnavailableRepository>(
        State(service),
        axum::extract::Path(("IA".to_string(), "ames".to_string())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
