use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationSubmission, NewApplication,
};
use crate::applications::repository::ApplicationRepository;
use crate::applications::service::ApplicationService;
use crate::listings::tests::common::MemoryJobs;
use crate::listings::JobId;
use crate::store::RepositoryError;

pub(super) use crate::listings::tests::common::{at, owned_listing, read_json_body};

pub(super) const OWNER: &str = "owner@acme.test";

pub(super) fn submission(job_id: &str, applicant_email: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        job_id: Some(job_id.to_string()),
        applicant_email: Some(applicant_email.to_string()),
        applicant_name: Some("Ada Lovelace".to_string()),
        linkedin_profile: Some("https://www.linkedin.com/in/ada".to_string()),
        cover_letter: Some("I would love to join.".to_string()),
    }
}

pub(super) fn record(id: &str, job_id: &str, email: &str, hour: u32) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId(id.to_string()),
        job_id: JobId(job_id.to_string()),
        applicant_email: email.to_string(),
        applicant_name: email.to_string(),
        linkedin_profile: "https://linkedin.com/in/someone".to_string(),
        cover_letter: String::new(),
        applied_at: at(hour),
    }
}

#[derive(Default)]
pub(super) struct MemoryApplications {
    records: Mutex<Vec<ApplicationRecord>>,
    sequence: AtomicU64,
}

impl MemoryApplications {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("applications mutex poisoned").len()
    }
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, application: NewApplication) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("applications mutex poisoned");
        if guard
            .iter()
            .any(|stored| stored.is_for(&application.job_id, &application.applicant_email))
        {
            return Err(RepositoryError::Conflict);
        }
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = application.into_record(ApplicationId(format!("app-{id:06}")));
        guard.push(record.clone());
        Ok(record)
    }

    fn find_for_applicant(
        &self,
        job_id: &JobId,
        applicant_email: &str,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard
            .iter()
            .find(|stored| stored.is_for(job_id, applicant_email))
            .cloned())
    }

    fn for_job(&self, job_id: &JobId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard
            .iter()
            .filter(|stored| &stored.job_id == job_id)
            .cloned()
            .collect())
    }

    fn for_jobs(
        &self,
        job_ids: &BTreeSet<JobId>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard
            .iter()
            .filter(|stored| job_ids.contains(&stored.job_id))
            .cloned()
            .collect())
    }
}

/// Loses the existence check to a concurrent twin: the read sees nothing, the write conflicts.
pub(super) struct RacingApplications;

impl ApplicationRepository for RacingApplications {
    fn insert(&self, _application: NewApplication) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn find_for_applicant(
        &self,
        _job_id: &JobId,
        _applicant_email: &str,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn for_job(&self, _job_id: &JobId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn for_jobs(
        &self,
        _job_ids: &BTreeSet<JobId>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn insert(&self, _application: NewApplication) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_for_applicant(
        &self,
        _job_id: &JobId,
        _applicant_email: &str,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_job(&self, _job_id: &JobId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_jobs(
        &self,
        _job_ids: &BTreeSet<JobId>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Returns a fixed set of applications regardless of the requested ids, standing in for
/// a store whose postings vanished between the two aggregation reads.
pub(super) struct FixedApplications(pub(super) Vec<ApplicationRecord>);

impl ApplicationRepository for FixedApplications {
    fn insert(&self, _application: NewApplication) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn find_for_applicant(
        &self,
        _job_id: &JobId,
        _applicant_email: &str,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn for_job(&self, _job_id: &JobId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.0.clone())
    }

    fn for_jobs(
        &self,
        _job_ids: &BTreeSet<JobId>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.0.clone())
    }
}

pub(super) fn build_service() -> (
    ApplicationService<MemoryJobs, MemoryApplications>,
    Arc<MemoryJobs>,
    Arc<MemoryApplications>,
) {
    let jobs = Arc::new(MemoryJobs::default());
    let applications = Arc::new(MemoryApplications::default());
    let service = ApplicationService::new(jobs.clone(), applications.clone());
    (service, jobs, applications)
}
