use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ApplicationId, LeadStatus};
use super::repository::{JoinedLead, LeadDetailRecord};

/// Label shown when a row carries no status.
pub const FALLBACK_STATUS_LABEL: &str = "PENDING";
/// Label shown when the citizenship join produced no country.
pub const FALLBACK_COUNTRY_LABEL: &str = "UNKNOWN";

const SUBMITTED_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// One row of the staff-facing lead list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRow {
    pub id: String,
    pub name: String,
    pub submitted: String,
    pub status: &'static str,
    pub country: String,
}

impl LeadRow {
    pub fn project(source: &JoinedLead) -> Self {
        lead_row(
            &source.record.id,
            &source.record.first_name,
            &source.record.last_name,
            source.record.created_at,
            Some(source.record.status),
            source.country_name.as_deref(),
        )
    }
}

/// Shape one joined row for display.
///
/// Total over its inputs: a missing status or country renders as the fallback
/// label instead of failing.
pub fn lead_row(
    id: &ApplicationId,
    first_name: &str,
    last_name: &str,
    submitted: DateTime<Utc>,
    status: Option<LeadStatus>,
    country: Option<&str>,
) -> LeadRow {
    LeadRow {
        id: id.0.clone(),
        name: format!("{first_name} {last_name}"),
        submitted: submitted.format(SUBMITTED_FORMAT).to_string(),
        status: status.map_or(FALLBACK_STATUS_LABEL, LeadStatus::label),
        country: country
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| FALLBACK_COUNTRY_LABEL.to_string(), str::to_owned),
    }
}

/// Full view backing the single-lead review surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadDetailView {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub additional_details: String,
    pub status: &'static str,
    pub country: String,
    pub submitted: String,
    pub categories: Vec<String>,
    pub resume_file_name: String,
    pub resume_content_type: String,
}

impl LeadDetailView {
    pub fn project(source: &LeadDetailRecord) -> Self {
        let record = &source.record;
        let row = lead_row(
            &record.id,
            &record.first_name,
            &record.last_name,
            record.created_at,
            Some(record.status),
            source.country_name.as_deref(),
        );

        Self {
            id: row.id,
            name: row.name,
            email: record.email.clone(),
            website: record.website.clone(),
            additional_details: record.additional_details.clone(),
            status: row.status,
            country: row.country,
            submitted: row.submitted,
            categories: source
                .categories
                .iter()
                .map(|category| category.name.clone())
                .collect(),
            resume_file_name: record.resume.file_name.clone(),
            resume_content_type: record.resume.content_type.clone(),
        }
    }
}
