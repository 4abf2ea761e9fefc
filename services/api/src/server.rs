use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPreferenceRepository};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use campus_match::config::AppConfig;
use campus_match::error::AppError;
use campus_match::matching::MatchingService;
use campus_match::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryPreferenceRepository::default());
    let matching_service = Arc::new(MatchingService::new(repository, config.scoring.clone()));

    let app = with_matching_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        baseline_price = config.scoring.normalization.baseline_price,
        campus_anchor = config.scoring.campus.is_some(),
        "campus match service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
