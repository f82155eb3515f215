use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, LeadSubmission};
use super::repository::{LeadRepository, RepositoryError};
use super::service::{LeadListQuery, LeadReviewService, LeadServiceError, LeadStatusView};
use super::session::SessionProvider;

/// Shared state handed to every lead handler.
pub struct ReviewContext<R, S> {
    pub service: Arc<LeadReviewService<R>>,
    pub sessions: Arc<S>,
}

impl<R, S> Clone for ReviewContext<R, S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

/// Router exposing the public intake endpoint and the session-gated review
/// surface.
pub fn lead_router<R, S>(service: Arc<LeadReviewService<R>>, sessions: Arc<S>) -> Router
where
    R: LeadRepository + 'static,
    S: SessionProvider + 'static,
{
    let context = ReviewContext { service, sessions };
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<R, S>))
        .route(
            "/api/v1/leads",
            get(list_handler::<R, S>).patch(reach_out_handler::<R, S>),
        )
        .route("/api/v1/leads/:application_id", get(detail_handler::<R, S>))
        .with_state(context)
}

/// Body of the status-update request; the id travels in the body, not the
/// path.
#[derive(Debug, Deserialize)]
pub(crate) struct ReachOutRequest {
    pub(crate) id: String,
}

pub(crate) async fn submit_handler<R, S>(
    State(context): State<ReviewContext<R, S>>,
    Json(submission): Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    S: SessionProvider + 'static,
{
    match context.service.submit(submission) {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(LeadServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "fields": error.fields,
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn list_handler<R, S>(
    State(context): State<ReviewContext<R, S>>,
    headers: HeaderMap,
    Query(query): Query<LeadListQuery>,
) -> Response
where
    R: LeadRepository + 'static,
    S: SessionProvider + 'static,
{
    let Some(viewer) = context.sessions.authenticate(bearer_token(&headers)) else {
        return unauthorized();
    };

    match context.service.list(&viewer, &query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn detail_handler<R, S>(
    State(context): State<ReviewContext<R, S>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    S: SessionProvider + 'static,
{
    let Some(viewer) = context.sessions.authenticate(bearer_token(&headers)) else {
        return unauthorized();
    };

    let id = ApplicationId(application_id);
    match context.service.detail(&viewer, &id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn reach_out_handler<R, S>(
    State(context): State<ReviewContext<R, S>>,
    headers: HeaderMap,
    Json(request): Json<ReachOutRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    S: SessionProvider + 'static,
{
    let Some(viewer) = context.sessions.authenticate(bearer_token(&headers)) else {
        return unauthorized();
    };

    let id = ApplicationId(request.id);
    match context.service.mark_reached_out(&viewer, &id) {
        Ok(record) => (StatusCode::OK, Json(LeadStatusView::from_record(&record))).into_response(),
        Err(LeadServiceError::AlreadyReachedOut) => {
            let payload = json!({
                "error": "application is already in REACHED_OUT status",
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::trim)
}

fn unauthorized() -> Response {
    let payload = json!({ "error": "authentication required" });
    (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
}

fn not_found(id: &ApplicationId) -> Response {
    let payload = json!({ "error": format!("application {id} not found") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

// Repository and transport failures reach callers as a generic message; the
// detail goes to the operator log only.
fn internal_error(error: LeadServiceError) -> Response {
    tracing::error!(%error, "lead operation failed");
    let payload = json!({ "error": "internal error" });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
