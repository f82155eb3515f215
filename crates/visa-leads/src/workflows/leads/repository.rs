use super::domain::{ApplicationId, LeadRecord, VisaCategory};
use super::query::{LeadFilter, PageSlice};

/// Application row joined with its citizenship country, as produced by the
/// list query. The join is a left join: a missing country is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedLead {
    pub record: LeadRecord,
    pub country_name: Option<String>,
}

/// Detail row: the country join plus the resolved category selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadDetailRecord {
    pub record: LeadRecord,
    pub country_name: Option<String>,
    pub categories: Vec<VisaCategory>,
}

/// Outcome of the conditional status write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Status moved `Pending -> ReachedOut`; the updated record is returned.
    Updated(LeadRecord),
    /// The record was already terminal; nothing was written.
    AlreadyReachedOut,
}

/// Datastore abstraction for the lead workflow.
///
/// `count` and `page` must interpret the same [`LeadFilter`] value so that
/// pagination totals agree with the listed rows. `mark_reached_out` must be a
/// single write scoped by id, never a read followed by a separate write, so
/// concurrent reviewers cannot lose updates.
pub trait LeadRepository: Send + Sync {
    /// Persist a new record together with its category selections.
    fn insert(
        &self,
        record: LeadRecord,
        categories: Vec<u16>,
    ) -> Result<LeadRecord, RepositoryError>;

    fn count(&self, filter: &LeadFilter) -> Result<usize, RepositoryError>;

    fn page(
        &self,
        filter: &LeadFilter,
        slice: PageSlice,
    ) -> Result<Vec<JoinedLead>, RepositoryError>;

    fn fetch(&self, id: &ApplicationId) -> Result<Option<LeadDetailRecord>, RepositoryError>;

    /// Conditional write: set status to `ReachedOut` where the id matches and
    /// the status is still `Pending`.
    fn mark_reached_out(&self, id: &ApplicationId) -> Result<TransitionOutcome, RepositoryError>;

    /// Visa category reference data, used to validate submissions.
    fn visa_categories(&self) -> Result<Vec<VisaCategory>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
