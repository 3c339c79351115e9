use chrono::{DateTime, Utc};

use super::domain::{ApplicationSubmission, NewApplication};
use crate::listings::JobId;

/// Validation errors raised before an application reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("applicant email `{0}` is not a valid address")]
    MalformedEmail(String),
    #[error("linkedin profile must be a linkedin.com URL (found `{0}`)")]
    MalformedLinkedinProfile(String),
}

const LINKEDIN_HOST: &str = "linkedin.com";

/// Guard responsible for producing `NewApplication` values.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Convert an inbound submission into a validated, timestamped application.
    ///
    /// Emails are trimmed and lower-cased so the uniqueness key is stable.
    pub fn admit(
        &self,
        submission: ApplicationSubmission,
        applied_at: DateTime<Utc>,
    ) -> Result<NewApplication, IntakeViolation> {
        let job_id = required(submission.job_id, "jobId")?;
        let applicant_email = required(submission.applicant_email, "applicantEmail")?
            .to_ascii_lowercase();
        let linkedin_profile = required(submission.linkedin_profile, "linkedinProfile")?;

        if !is_plausible_email(&applicant_email) {
            return Err(IntakeViolation::MalformedEmail(applicant_email));
        }
        if !is_linkedin_url(&linkedin_profile) {
            return Err(IntakeViolation::MalformedLinkedinProfile(linkedin_profile));
        }

        let applicant_name = submission
            .applicant_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| applicant_email.clone());

        Ok(NewApplication {
            job_id: JobId(job_id),
            applicant_email,
            applicant_name,
            linkedin_profile,
            cover_letter: submission.cover_letter.unwrap_or_default(),
            applied_at,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, IntakeViolation> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(IntakeViolation::MissingField(field))
}

/// True when the URL's host is `linkedin.com` or one of its subdomains.
fn is_linkedin_url(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    let rest = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_and_port = authority.rsplit('@').next().unwrap_or_default();
    let host = host_and_port.split(':').next().unwrap_or_default();
    let host = host.strip_suffix('.').unwrap_or(host);

    host == LINKEDIN_HOST
        || host
            .strip_suffix(LINKEDIN_HOST)
            .is_some_and(|prefix| prefix.len() > 1 && prefix.ends_with('.'))
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
