//! Lead intake and review workflow.
//!
//! Prospective applicants submit a visa-assessment form through the public
//! intake endpoint; staff review submissions through a paginated, filterable
//! lead list and mark each lead "reached out" exactly once. The datastore and
//! the session provider sit behind traits so every operation can be exercised
//! against in-memory fakes.

pub mod domain;
pub mod intake;
pub mod projection;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, CategorySelection, Country, LeadRecord, LeadStatus, LeadSubmission,
    ResumeUpload, VisaCategory,
};
pub use intake::{FieldError, IntakeGuard, IntakePolicy, ValidationError};
pub use projection::{
    LeadDetailView, LeadRow, FALLBACK_COUNTRY_LABEL, FALLBACK_STATUS_LABEL,
};
pub use query::{LeadFilter, PageSlice, Paginator, PAGE_SIZE};
pub use repository::{
    JoinedLead, LeadDetailRecord, LeadRepository, RepositoryError, TransitionOutcome,
};
pub use router::lead_router;
pub use service::{
    LeadListPage, LeadListQuery, LeadReviewService, LeadServiceError, LeadStatusView,
};
pub use session::{AuthenticatedUser, SessionProvider};
