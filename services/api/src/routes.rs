use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use visa_leads::workflows::leads::{
    lead_router, LeadRepository, LeadReviewService, SessionProvider,
};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct StatusResponse {
    pub(crate) status: &'static str,
}

pub(crate) fn with_lead_routes<R, S>(
    service: Arc<LeadReviewService<R>>,
    sessions: Arc<S>,
) -> axum::Router
where
    R: LeadRepository + 'static,
    S: SessionProvider + 'static,
{
    lead_router(service, sessions)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    if ready {
        (StatusCode::OK, Json(StatusResponse { status: "ready" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusResponse {
                status: "initializing",
            }),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
