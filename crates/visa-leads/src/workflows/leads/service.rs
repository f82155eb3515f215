use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, LeadRecord, LeadStatus, LeadSubmission};
use super::intake::{IntakeGuard, ValidationError};
use super::projection::{LeadDetailView, LeadRow};
use super::query::{LeadFilter, Paginator};
use super::repository::{LeadRepository, RepositoryError, TransitionOutcome};
use super::session::AuthenticatedUser;

/// Service composing the intake guard, the repository, and the review
/// queries. Review operations take the authenticated user explicitly; the
/// public submission path does not.
pub struct LeadReviewService<R> {
    guard: IntakeGuard,
    repository: Arc<R>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("lead-{id:06}"))
}

/// Raw listing parameters as they arrive from the HTTP surface. `page` stays
/// a string so a non-numeric value can degrade to page 1 instead of failing
/// extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
}

/// One page of projected leads plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadListPage {
    pub leads: Vec<LeadRow>,
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Minimal id-plus-status acknowledgement, shared by the submission receipt
/// and the status-update response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadStatusView {
    pub id: String,
    pub status: &'static str,
}

impl LeadStatusView {
    pub fn from_record(record: &LeadRecord) -> Self {
        Self {
            id: record.id.0.clone(),
            status: record.status.label(),
        }
    }
}

impl<R> LeadReviewService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_guard(IntakeGuard::default(), repository)
    }

    pub fn with_guard(guard: IntakeGuard, repository: Arc<R>) -> Self {
        Self { guard, repository }
    }

    /// Validate and persist a public submission, returning the receipt.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadStatusView, LeadServiceError> {
        let known = self.repository.visa_categories()?;
        self.guard.validate(&submission, &known)?;

        let LeadSubmission {
            first_name,
            last_name,
            email,
            website,
            additional_details,
            citizenship,
            categories,
            resume,
        } = submission;

        let record = LeadRecord {
            id: next_application_id(),
            first_name,
            last_name,
            email,
            website: website.filter(|url| !url.trim().is_empty()),
            additional_details,
            status: LeadStatus::Pending,
            citizenship: citizenship.filter(|code| !code.trim().is_empty()),
            resume,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record, categories)?;
        Ok(LeadStatusView::from_record(&stored))
    }

    /// Paginated, filtered listing for the review dashboard. The count and
    /// the page run under the same filter value.
    pub fn list(
        &self,
        _viewer: &AuthenticatedUser,
        query: &LeadListQuery,
    ) -> Result<LeadListPage, LeadServiceError> {
        let filter = LeadFilter::from_params(query.search.as_deref(), query.status.as_deref());
        let paginator = Paginator::from_param(query.page.as_deref());

        let total = self.repository.count(&filter)?;
        let rows = self.repository.page(&filter, paginator.slice())?;

        Ok(LeadListPage {
            leads: rows.iter().map(LeadRow::project).collect(),
            page: paginator.page(),
            total,
            total_pages: paginator.total_pages(total),
        })
    }

    /// Single-lead view for the review surface.
    pub fn detail(
        &self,
        _viewer: &AuthenticatedUser,
        id: &ApplicationId,
    ) -> Result<LeadDetailView, LeadServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(LeadDetailView::project(&record))
    }

    /// One-way transition to `ReachedOut`. A repeat call surfaces the
    /// conflict outcome and leaves the stored record untouched.
    pub fn mark_reached_out(
        &self,
        _viewer: &AuthenticatedUser,
        id: &ApplicationId,
    ) -> Result<LeadRecord, LeadServiceError> {
        match self.repository.mark_reached_out(id)? {
            TransitionOutcome::Updated(record) => Ok(record),
            TransitionOutcome::AlreadyReachedOut => Err(LeadServiceError::AlreadyReachedOut),
        }
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("application is already in REACHED_OUT status")]
    AlreadyReachedOut,
}
