use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::workflows::leads::domain::{
    ApplicationId, CategorySelection, Country, LeadRecord, LeadStatus, LeadSubmission,
    ResumeUpload, VisaCategory,
};
use crate::workflows::leads::query::{LeadFilter, PageSlice};
use crate::workflows::leads::repository::{
    JoinedLead, LeadDetailRecord, LeadRepository, RepositoryError, TransitionOutcome,
};
use crate::workflows::leads::service::LeadReviewService;
use crate::workflows::leads::session::{AuthenticatedUser, SessionProvider};

pub(super) fn countries() -> Vec<Country> {
    vec![
        Country {
            code: "US".to_string(),
            name: "United States".to_string(),
        },
        Country {
            code: "BR".to_string(),
            name: "Brazil".to_string(),
        },
        Country {
            code: "DE".to_string(),
            name: "Germany".to_string(),
        },
    ]
}

pub(super) fn visa_categories() -> Vec<VisaCategory> {
    vec![
        VisaCategory {
            id: 1,
            name: "O-1".to_string(),
            description: "Visa for individuals with extraordinary ability.".to_string(),
        },
        VisaCategory {
            id: 2,
            name: "EB-1A".to_string(),
            description: "Employment-based visa for extraordinary ability.".to_string(),
        },
        VisaCategory {
            id: 3,
            name: "EB-2 NIW".to_string(),
            description: "Employment-based visa, National Interest Waiver.".to_string(),
        },
    ]
}

pub(super) fn resume() -> ResumeUpload {
    ResumeUpload {
        file_name: "resume.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        content: b"%PDF-1.4 sample".to_vec(),
    }
}

pub(super) fn submission() -> LeadSubmission {
    LeadSubmission {
        first_name: "Maria".to_string(),
        last_name: "Santos".to_string(),
        email: "maria.santos@example.com".to_string(),
        website: Some("https://mariasantos.dev".to_string()),
        additional_details: "Published researcher seeking an O-1.".to_string(),
        citizenship: Some("BR".to_string()),
        categories: vec![1],
        resume: resume(),
    }
}

/// Stored record helper for tests that bypass the submission path.
pub(super) fn record(id: &str, first_name: &str, citizenship: Option<&str>) -> LeadRecord {
    LeadRecord {
        id: ApplicationId(id.to_string()),
        first_name: first_name.to_string(),
        last_name: "Applicant".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        website: None,
        additional_details: "Details on file.".to_string(),
        status: LeadStatus::Pending,
        citizenship: citizenship.map(str::to_string),
        resume: resume(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
    }
}

#[derive(Default)]
pub(super) struct MemoryLeadRepository {
    countries: Vec<Country>,
    categories: Vec<VisaCategory>,
    records: Mutex<Vec<LeadRecord>>,
    selections: Mutex<Vec<CategorySelection>>,
}

impl MemoryLeadRepository {
    pub(super) fn with_reference_data() -> Self {
        Self {
            countries: countries(),
            categories: visa_categories(),
            records: Mutex::new(Vec::new()),
            selections: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn seed(&self, records: impl IntoIterator<Item = LeadRecord>) {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.extend(records);
    }

    pub(super) fn stored(&self, id: &ApplicationId) -> Option<LeadRecord> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        guard.iter().find(|record| record.id == *id).cloned()
    }

    pub(super) fn selections_for(&self, id: &ApplicationId) -> Vec<u16> {
        let guard = self.selections.lock().expect("selection mutex poisoned");
        guard
            .iter()
            .filter(|selection| selection.application_id == *id)
            .map(|selection| selection.category_id)
            .collect()
    }

    fn country_name(&self, code: Option<&str>) -> Option<String> {
        let code = code?;
        self.countries
            .iter()
            .find(|country| country.code == code)
            .map(|country| country.name.clone())
    }
}

impl LeadRepository for MemoryLeadRepository {
    fn insert(
        &self,
        record: LeadRecord,
        categories: Vec<u16>,
    ) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        let mut selections = self.selections.lock().expect("selection mutex poisoned");
        selections.extend(categories.into_iter().map(|category_id| CategorySelection {
            application_id: record.id.clone(),
            category_id,
        }));
        guard.push(record.clone());
        Ok(record)
    }

    fn count(&self, filter: &LeadFilter) -> Result<usize, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| {
                let country = self.country_name(record.citizenship.as_deref());
                filter.matches(&record.first_name, country.as_deref(), record.status)
            })
            .count())
    }

    fn page(
        &self,
        filter: &LeadFilter,
        slice: PageSlice,
    ) -> Result<Vec<JoinedLead>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| {
                let country = self.country_name(record.citizenship.as_deref());
                filter.matches(&record.first_name, country.as_deref(), record.status)
            })
            .skip(slice.offset)
            .take(slice.limit)
            .map(|record| JoinedLead {
                record: record.clone(),
                country_name: self.country_name(record.citizenship.as_deref()),
            })
            .collect())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<LeadDetailRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let Some(record) = guard.iter().find(|record| record.id == *id) else {
            return Ok(None);
        };
        let selections = self.selections.lock().expect("selection mutex poisoned");
        let categories = selections
            .iter()
            .filter(|selection| selection.application_id == *id)
            .filter_map(|selection| {
                self.categories
                    .iter()
                    .find(|category| category.id == selection.category_id)
                    .cloned()
            })
            .collect();
        Ok(Some(LeadDetailRecord {
            record: record.clone(),
            country_name: self.country_name(record.citizenship.as_deref()),
            categories,
        }))
    }

    fn mark_reached_out(&self, id: &ApplicationId) -> Result<TransitionOutcome, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| record.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        match record.status.reach_out() {
            Some(next) => {
                record.status = next;
                Ok(TransitionOutcome::Updated(record.clone()))
            }
            None => Ok(TransitionOutcome::AlreadyReachedOut),
        }
    }

    fn visa_categories(&self) -> Result<Vec<VisaCategory>, RepositoryError> {
        Ok(self.categories.clone())
    }
}

/// Session provider accepting a single token, mirroring the deployment shape.
pub(super) struct StaticSessions {
    token: String,
}

impl StaticSessions {
    pub(super) fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl SessionProvider for StaticSessions {
    fn authenticate(&self, token: Option<&str>) -> Option<AuthenticatedUser> {
        let token = token?;
        (token == self.token).then(|| AuthenticatedUser {
            id: "reviewer-1".to_string(),
            email: "staff@example.com".to_string(),
        })
    }
}

pub(super) fn viewer() -> AuthenticatedUser {
    AuthenticatedUser {
        id: "reviewer-1".to_string(),
        email: "staff@example.com".to_string(),
    }
}

pub(super) fn build_service() -> (
    LeadReviewService<MemoryLeadRepository>,
    Arc<MemoryLeadRepository>,
) {
    let repository = Arc::new(MemoryLeadRepository::with_reference_data());
    let service = LeadReviewService::new(repository.clone());
    (service, repository)
}
