use serde::Serialize;

use super::domain::{LeadSubmission, VisaCategory};

const DEFAULT_MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Per-field validation detail reported back to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Submission rejected before anything was persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("submission failed validation on {} field(s)", .fields.len())]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

/// Dials for intake checks that are policy rather than shape.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    pub max_resume_bytes: usize,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            max_resume_bytes: DEFAULT_MAX_RESUME_BYTES,
        }
    }
}

/// Validates public submissions before they reach the repository.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn new(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Check every field and report all offenders at once.
    pub fn validate(
        &self,
        submission: &LeadSubmission,
        known_categories: &[VisaCategory],
    ) -> Result<(), ValidationError> {
        let mut fields = Vec::new();

        require_text(&mut fields, "first_name", &submission.first_name);
        require_text(&mut fields, "last_name", &submission.last_name);
        require_text(
            &mut fields,
            "additional_details",
            &submission.additional_details,
        );

        if !plausible_email(submission.email.trim()) {
            fields.push(FieldError {
                field: "email",
                message: "a valid email address is required".to_string(),
            });
        }

        if let Some(url) = submission.website.as_deref().map(str::trim) {
            // Blank means "not provided"; anything else must be an http(s) URL.
            if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
                fields.push(FieldError {
                    field: "website",
                    message: "website must be an http(s) URL".to_string(),
                });
            }
        }

        if submission.categories.is_empty() {
            fields.push(FieldError {
                field: "categories",
                message: "at least one visa category must be selected".to_string(),
            });
        } else {
            for id in &submission.categories {
                if !known_categories.iter().any(|category| category.id == *id) {
                    fields.push(FieldError {
                        field: "categories",
                        message: format!("unknown visa category id {id}"),
                    });
                }
            }
        }

        if submission.resume.file_name.trim().is_empty() {
            fields.push(FieldError {
                field: "resume.file_name",
                message: "résumé file name is required".to_string(),
            });
        }
        if submission.resume.content_type.parse::<mime::Mime>().is_err() {
            fields.push(FieldError {
                field: "resume.content_type",
                message: format!(
                    "'{}' is not a valid MIME type",
                    submission.resume.content_type
                ),
            });
        }
        if submission.resume.content.len() > self.policy.max_resume_bytes {
            fields.push(FieldError {
                field: "resume.content",
                message: format!(
                    "résumé exceeds the {} byte limit",
                    self.policy.max_resume_bytes
                ),
            });
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }
}

fn require_text(fields: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        fields.push(FieldError {
            field,
            message: format!("{field} is required"),
        });
    }
}

// Not RFC 5322; just enough to keep obvious typos out of the funnel.
fn plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !value.contains(char::is_whitespace)
}
