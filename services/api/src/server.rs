use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCityRepository};
use crate::routes::with_city_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tapwater::cities::WaterQualityService;
use tapwater::config::AppConfig;
use tapwater::error::AppError;
use tapwater::import::CityRecordImporter;
use tapwater::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(records) = args.records.take() {
        config.assessment.records_path = Some(records);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCityRepository::default());
    let service = Arc::new(WaterQualityService::new(
        repository,
        config.assessment.policy.clone(),
    ));

    if let Some(path) = &config.assessment.records_path {
        let records = CityRecordImporter::from_path(path, service.assessor())?;
        let loaded = service.register_all(records)?;
        info!(loaded, path = %path.display(), "city records loaded");
    }

    let app = with_city_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tapwater assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
