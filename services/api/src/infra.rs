use chrono::{DateTime, Utc};
use job_board::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository, NewApplication,
};
use job_board::listings::{JobId, JobListing, JobPosting, JobRepository};
use job_board::store::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    postings: Arc<Mutex<Vec<JobPosting>>>,
    sequence: Arc<AtomicU64>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(
        &self,
        listing: JobListing,
        created_at: DateTime<Utc>,
    ) -> Result<JobPosting, RepositoryError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let posting = JobPosting {
            id: JobId(format!("job-{id:06}")),
            listing,
            created_at,
        };
        let mut guard = self.postings.lock().expect("job mutex poisoned");
        guard.push(posting.clone());
        Ok(posting)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("job mutex poisoned");
        Ok(guard.iter().find(|posting| &posting.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Ok(self.postings.lock().expect("job mutex poisoned").clone())
    }

    fn owned_by(&self, owner_email: &str) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("job mutex poisoned");
        Ok(guard
            .iter()
            .filter(|posting| posting.is_owned_by(owner_email))
            .cloned()
            .collect())
    }

    fn update(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = self.postings.lock().expect("job mutex poisoned");
        match guard.iter_mut().find(|stored| stored.id == posting.id) {
            Some(stored) => {
                *stored = posting;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &JobId) -> Result<bool, RepositoryError> {
        let mut guard = self.postings.lock().expect("job mutex poisoned");
        let before = guard.len();
        guard.retain(|posting| &posting.id != id);
        Ok(guard.len() != before)
    }
}

#[derive(Default)]
struct ApplicationTable {
    records: Vec<ApplicationRecord>,
    pairs: HashSet<(JobId, String)>,
}

/// Records and the (job, applicant) index live under one lock so the uniqueness check and
/// the write happen together.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    table: Arc<Mutex<ApplicationTable>>,
    sequence: Arc<AtomicU64>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: NewApplication) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.table.lock().expect("application mutex poisoned");
        let pair = (
            application.job_id.clone(),
            application.applicant_email.clone(),
        );
        if guard.pairs.contains(&pair) {
            return Err(RepositoryError::Conflict);
        }
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = application.into_record(ApplicationId(format!("app-{id:06}")));
        guard.pairs.insert(pair);
        guard.records.push(record.clone());
        Ok(record)
    }

    fn find_for_applicant(
        &self,
        job_id: &JobId,
        applicant_email: &str,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.table.lock().expect("application mutex poisoned");
        Ok(guard
            .records
            .iter()
            .find(|record| record.is_for(job_id, applicant_email))
            .cloned())
    }

    fn for_job(&self, job_id: &JobId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.table.lock().expect("application mutex poisoned");
        Ok(guard
            .records
            .iter()
            .filter(|record| &record.job_id == job_id)
            .cloned()
            .collect())
    }

    fn for_jobs(
        &self,
        job_ids: &BTreeSet<JobId>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.table.lock().expect("application mutex poisoned");
        Ok(guard
            .records
            .iter()
            .filter(|record| job_ids.contains(&record.job_id))
            .cloned()
            .collect())
    }
}
