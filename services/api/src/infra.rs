use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use visa_leads::workflows::leads::{
    ApplicationId, AuthenticatedUser, CategorySelection, Country, JoinedLead, LeadDetailRecord,
    LeadFilter, LeadRecord, LeadRepository, PageSlice, RepositoryError, SessionProvider,
    TransitionOutcome, VisaCategory,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Country reference data, shipped in-process until a real datastore backs
/// the service.
pub(crate) fn reference_countries() -> Vec<Country> {
    [
        ("US", "United States"),
        ("BR", "Brazil"),
        ("CA", "Canada"),
        ("CN", "China"),
        ("DE", "Germany"),
        ("FR", "France"),
        ("GB", "United Kingdom"),
        ("IN", "India"),
        ("MX", "Mexico"),
        ("NG", "Nigeria"),
    ]
    .into_iter()
    .map(|(code, name)| Country {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub(crate) fn reference_categories() -> Vec<VisaCategory> {
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
            description:
                "Employment-based visa for professionals with advanced degrees (National Interest Waiver)."
                    .to_string(),
        },
        VisaCategory {
            id: 4,
            name: "UNKNOWN".to_string(),
            description: "Unspecified category.".to_string(),
        },
    ]
}

/// In-memory implementation of the lead datastore. Interprets the typed
/// filter once for both `count` and `page`, and performs the status
/// transition as a single conditional write under one lock scope.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    countries: Arc<Vec<Country>>,
    categories: Arc<Vec<VisaCategory>>,
    records: Arc<Mutex<Vec<LeadRecord>>>,
    selections: Arc<Mutex<Vec<CategorySelection>>>,
}

impl InMemoryLeadRepository {
    pub(crate) fn new(countries: Vec<Country>, categories: Vec<VisaCategory>) -> Self {
        Self {
            countries: Arc::new(countries),
            categories: Arc::new(categories),
            records: Arc::new(Mutex::new(Vec::new())),
            selections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn country_name(&self, code: Option<&str>) -> Option<String> {
        let code = code?;
        self.countries
            .iter()
            .find(|country| country.code == code)
            .map(|country| country.name.clone())
    }
}

impl LeadRepository for InMemoryLeadRepository {
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
        Ok(self.categories.as_ref().clone())
    }
}

/// Session provider backed by the single configured admin token. With no
/// token configured the review surface rejects every request.
pub(crate) struct StaticTokenSessions {
    admin_token: Option<String>,
}

impl StaticTokenSessions {
    pub(crate) fn new(admin_token: Option<String>) -> Self {
        Self { admin_token }
    }
}

impl SessionProvider for StaticTokenSessions {
    fn authenticate(&self, token: Option<&str>) -> Option<AuthenticatedUser> {
        let expected = self.admin_token.as_deref()?;
        let presented = token?;
        (presented == expected).then(|| AuthenticatedUser {
            id: "admin".to_string(),
            email: "admin@visa-leads.local".to_string(),
        })
    }
}
