use crate::cli::ServeArgs;
use crate::infra::{
    reference_categories, reference_countries, AppState, InMemoryLeadRepository,
    StaticTokenSessions,
};
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use visa_leads::config::AppConfig;
use visa_leads::error::AppError;
use visa_leads::telemetry;
use visa_leads::workflows::leads::LeadReviewService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.auth.admin_token.is_none() {
        warn!("APP_ADMIN_TOKEN is unset; review endpoints will reject every request");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLeadRepository::new(
        reference_countries(),
        reference_categories(),
    ));
    let service = Arc::new(LeadReviewService::new(repository));
    let sessions = Arc::new(StaticTokenSessions::new(config.auth.admin_token.clone()));

    let app = with_lead_routes(service, sessions)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "visa lead intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
