use chrono::{DateTime, Utc};

use super::domain::{JobId, JobListing, JobPosting};
use crate::store::RepositoryError;

/// Storage abstraction for postings; the store assigns identifiers on insert.
pub trait JobRepository: Send + Sync {
    fn insert(
        &self,
        listing: JobListing,
        created_at: DateTime<Utc>,
    ) -> Result<JobPosting, RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    /// Every posting, in insertion order.
    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    fn owned_by(&self, owner_email: &str) -> Result<Vec<JobPosting>, RepositoryError>;
    /// Replace a stored posting; `NotFound` when the id is unknown.
    fn update(&self, posting: JobPosting) -> Result<(), RepositoryError>;
    /// Returns whether a posting was removed.
    fn delete(&self, id: &JobId) -> Result<bool, RepositoryError>;
}
