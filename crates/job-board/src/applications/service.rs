use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::aggregate::{join_with_postings, sort_newest_first};
use super::domain::{ApplicationRecord, ApplicationSubmission, ApplicationView};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::ApplicationRepository;
use crate::listings::{JobId, JobRepository};
use crate::store::RepositoryError;

/// Service composing the intake guard, the application store, and the posting store.
pub struct ApplicationService<J, A> {
    guard: IntakeGuard,
    jobs: Arc<J>,
    applications: Arc<A>,
}

impl<J, A> ApplicationService<J, A>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self {
            guard: IntakeGuard,
            jobs,
            applications,
        }
    }

    /// Submit a new application stamped with the current time.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &self,
        submission: ApplicationSubmission,
        applied_at: DateTime<Utc>,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let application = self.guard.admit(submission, applied_at)?;

        if self
            .applications
            .find_for_applicant(&application.job_id, &application.applicant_email)?
            .is_some()
        {
            return Err(duplicate(application.job_id, application.applicant_email));
        }

        // The pre-check only spares a write; the store still rejects a concurrent twin.
        let job_id = application.job_id.clone();
        let applicant_email = application.applicant_email.clone();
        let stored = self
            .applications
            .insert(application)
            .map_err(|err| match err {
                RepositoryError::Conflict => duplicate(job_id, applicant_email),
                other => other.into(),
            })?;

        info!(
            application_id = %stored.id,
            job_id = %stored.job_id,
            "application submitted"
        );
        Ok(stored)
    }

    /// Applications for a single posting, newest first.
    pub fn for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        let mut applications = self.applications.for_job(job_id)?;
        sort_newest_first(&mut applications, |record| record);
        Ok(applications)
    }

    /// Every application against postings owned by `owner_email`, newest first.
    pub fn for_owner(
        &self,
        owner_email: &str,
    ) -> Result<Vec<ApplicationView>, ApplicationServiceError> {
        let postings = self.jobs.owned_by(owner_email)?;
        let job_ids: BTreeSet<JobId> = postings.iter().map(|posting| posting.id.clone()).collect();
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }

        let applications = self.applications.for_jobs(&job_ids)?;
        debug!(
            owner = owner_email,
            postings = postings.len(),
            applications = applications.len(),
            "aggregating owner applications"
        );
        Ok(join_with_postings(&postings, applications))
    }
}

fn duplicate(job_id: JobId, applicant_email: String) -> ApplicationServiceError {
    info!(job_id = %job_id, "duplicate application rejected");
    ApplicationServiceError::Duplicate {
        job_id,
        applicant_email,
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] IntakeViolation),
    #[error("You have already applied for this job")]
    Duplicate {
        job_id: JobId,
        applicant_email: String,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
