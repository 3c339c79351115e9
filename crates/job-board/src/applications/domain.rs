use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listings::JobId;

/// Identifier wrapper for stored applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw candidate payload. Every field is optional so intake can report what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub applicant_email: Option<String>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

/// Validated application waiting for its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub job_id: JobId,
    pub applicant_email: String,
    pub applicant_name: String,
    pub linkedin_profile: String,
    pub cover_letter: String,
    pub applied_at: DateTime<Utc>,
}

impl NewApplication {
    pub fn into_record(self, id: ApplicationId) -> ApplicationRecord {
        ApplicationRecord {
            id,
            job_id: self.job_id,
            applicant_email: self.applicant_email,
            applicant_name: self.applicant_name,
            linkedin_profile: self.linkedin_profile,
            cover_letter: self.cover_letter,
            applied_at: self.applied_at,
        }
    }
}

/// Stored application. `job_id` is a lookup key only; the posting may be gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(alias = "_id")]
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant_email: String,
    pub applicant_name: String,
    pub linkedin_profile: String,
    pub cover_letter: String,
    pub applied_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Whether this record occupies the (job, applicant) slot.
    pub fn is_for(&self, job_id: &JobId, applicant_email: &str) -> bool {
        &self.job_id == job_id && self.applicant_email == applicant_email
    }
}

/// Application enriched with display metadata from its posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: ApplicationRecord,
    pub job_title: String,
    pub company_name: String,
}
