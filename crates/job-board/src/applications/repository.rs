use std::collections::BTreeSet;

use super::domain::{ApplicationRecord, NewApplication};
use crate::listings::JobId;
use crate::store::RepositoryError;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// `insert` is the authoritative guard for the (job, applicant) uniqueness invariant: it must
/// check and write atomically and answer `RepositoryError::Conflict` when the pair is taken.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: NewApplication) -> Result<ApplicationRecord, RepositoryError>;
    fn find_for_applicant(
        &self,
        job_id: &JobId,
        applicant_email: &str,
    ) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn for_job(&self, job_id: &JobId) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    /// Applications whose job id is a member of `job_ids`.
    fn for_jobs(
        &self,
        job_ids: &BTreeSet<JobId>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}
