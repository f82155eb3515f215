use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications. Opaque to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review state of an application.
///
/// `Pending` is the only initial state and `ReachedOut` is terminal; the one
/// legal transition lives in [`LeadStatus::reach_out`] so no other move is
/// expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    #[default]
    Pending,
    ReachedOut,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::Pending => "PENDING",
            LeadStatus::ReachedOut => "REACHED_OUT",
        }
    }

    /// Parse a query-parameter value. Unknown labels yield `None` so callers
    /// degrade to an unfiltered query instead of failing.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "PENDING" => Some(Self::Pending),
            "REACHED_OUT" => Some(Self::ReachedOut),
            _ => None,
        }
    }

    /// The single legal transition. `None` once the status is terminal.
    pub const fn reach_out(self) -> Option<Self> {
        match self {
            LeadStatus::Pending => Some(LeadStatus::ReachedOut),
            LeadStatus::ReachedOut => None,
        }
    }
}

/// ISO-style country reference row. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

/// Visa category reference row (e.g. "O-1"). Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaCategory {
    pub id: u16,
    pub name: String,
    pub description: String,
}

/// Join row linking one application to one selected category. Created once at
/// submission, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    pub application_id: ApplicationId,
    pub category_id: u16,
}

/// Résumé payload captured at submission. The content is stored untouched;
/// nothing in the workflow interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    #[serde(default)]
    pub content: Vec<u8>,
}

/// Raw payload from the public intake form, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    pub additional_details: String,
    /// Country code for the applicant's citizenship, when provided.
    #[serde(default)]
    pub citizenship: Option<String>,
    pub categories: Vec<u16>,
    pub resume: ResumeUpload,
}

/// Persisted application row. Applicant fields are immutable once submitted;
/// status is the only field mutated afterwards, and only by the review flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: ApplicationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub website: Option<String>,
    pub additional_details: String,
    pub status: LeadStatus,
    pub citizenship: Option<String>,
    pub resume: ResumeUpload,
    pub created_at: DateTime<Utc>,
}
