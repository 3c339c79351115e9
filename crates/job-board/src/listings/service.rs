use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{EmploymentType, JobId, JobListing, JobPosting, SalaryType};
use super::filter::{
    filter_by_title, select_page_with, CategorySelector, FacetFilter, ListingFilter,
    PageNavigation,
};
use super::repository::JobRepository;
use super::seed::SeedEntry;
use crate::store::RepositoryError;

/// Field problems that keep a posting out of the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingViolation {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` must be a non-negative amount (found {value})")]
    InvalidSalary { field: &'static str, value: f64 },
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Validation(#[from] ListingViolation),
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Query-string form of a browse request.
///
/// Any facet parameter switches from the single category selector to the facet filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseRequest {
    #[serde(default)]
    pub query: String,
    pub category: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub max_salary: Option<f64>,
    pub salary_type: Option<SalaryType>,
    pub employment_type: Option<EmploymentType>,
}

impl BrowseRequest {
    pub fn facets(&self) -> FacetFilter {
        FacetFilter {
            max_salary: self.max_salary,
            salary_type: self.salary_type,
            employment_type: self.employment_type,
        }
    }
}

/// Owned page returned to HTTP and CLI callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    pub items: Vec<JobPosting>,
    pub total_count: usize,
    #[serde(flatten)]
    pub navigation: PageNavigation,
}

/// Posting CRUD plus server-side browsing over the full snapshot.
pub struct JobListingService<J> {
    repository: Arc<J>,
    page_size: usize,
}

impl<J> JobListingService<J>
where
    J: JobRepository + 'static,
{
    pub fn new(repository: Arc<J>, page_size: usize) -> Self {
        Self {
            repository,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn post(&self, listing: JobListing) -> Result<JobPosting, ListingServiceError> {
        self.post_at(listing, Utc::now())
    }

    pub fn post_at(
        &self,
        listing: JobListing,
        created_at: DateTime<Utc>,
    ) -> Result<JobPosting, ListingServiceError> {
        let listing = sanitize(listing)?;
        let posting = self.repository.insert(listing, created_at)?;
        info!(job_id = %posting.id, owner = %posting.listing.posted_by, "job posted");
        Ok(posting)
    }

    /// Insert every exported listing, returning how many were stored.
    pub fn import(&self, entries: Vec<SeedEntry>) -> Result<usize, ListingServiceError> {
        let created_at = Utc::now();
        let mut imported = 0;
        for entry in entries {
            self.post_at(entry.listing, created_at)?;
            imported += 1;
        }
        Ok(imported)
    }

    pub fn get(&self, id: &JobId) -> Result<Option<JobPosting>, ListingServiceError> {
        Ok(self.repository.fetch(id)?)
    }

    pub fn all(&self) -> Result<Vec<JobPosting>, ListingServiceError> {
        Ok(self.repository.all()?)
    }

    /// Owner's postings, optionally narrowed by a title search.
    pub fn owned_by(
        &self,
        owner_email: &str,
        search: Option<&str>,
    ) -> Result<Vec<JobPosting>, ListingServiceError> {
        let postings = self.repository.owned_by(owner_email)?;
        match search.map(str::trim).filter(|value| !value.is_empty()) {
            Some(query) => Ok(filter_by_title(&postings, query)
                .into_iter()
                .cloned()
                .collect()),
            None => Ok(postings),
        }
    }

    /// Replace the mutable fields of a posting. Owner, id and creation time are kept.
    pub fn update(
        &self,
        id: &JobId,
        listing: JobListing,
    ) -> Result<JobPosting, ListingServiceError> {
        let mut listing = sanitize(listing)?;
        let mut posting = self
            .repository
            .fetch(id)?
            .ok_or_else(|| ListingServiceError::NotFound(id.clone()))?;

        listing.posted_by = posting.listing.posted_by.clone();
        posting.listing = listing;

        self.repository.update(posting.clone()).map_err(|err| match err {
            RepositoryError::NotFound => ListingServiceError::NotFound(id.clone()),
            other => other.into(),
        })?;
        info!(job_id = %id, "job updated");
        Ok(posting)
    }

    pub fn delete(&self, id: &JobId) -> Result<bool, ListingServiceError> {
        let removed = self.repository.delete(id)?;
        if removed {
            info!(job_id = %id, "job deleted");
        }
        Ok(removed)
    }

    /// Run the filter engine over the current snapshot.
    pub fn browse(&self, request: &BrowseRequest) -> Result<BrowseResponse, ListingServiceError> {
        let snapshot = self.repository.all()?;
        let page = request.page.unwrap_or(1);
        let page_size = request.page_size.unwrap_or(self.page_size);

        let facets = request.facets();
        let filter: Box<dyn ListingFilter> = if facets.is_empty() {
            Box::new(CategorySelector::new(request.category.as_deref()))
        } else {
            Box::new(facets)
        };

        let selected = select_page_with(
            &snapshot,
            &request.query,
            filter.as_ref(),
            page,
            page_size,
        );
        Ok(BrowseResponse {
            items: selected.to_owned_items(),
            total_count: selected.total_count,
            navigation: PageNavigation::new(page, page_size, selected.total_count),
        })
    }
}

fn sanitize(mut listing: JobListing) -> Result<JobListing, ListingViolation> {
    listing.title = required(listing.title, "title")?;
    listing.company_name = required(listing.company_name, "companyName")?;
    listing.posted_by = required(listing.posted_by, "postedBy")?;
    listing.location = listing.location.trim().to_string();

    for (field, value) in [
        ("minSalary", listing.min_salary),
        ("maxSalary", listing.max_salary),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ListingViolation::InvalidSalary { field, value });
        }
    }

    if listing.min_salary > listing.max_salary {
        warn!(
            title = %listing.title,
            min_salary = listing.min_salary,
            max_salary = listing.max_salary,
            "posting advertises a minimum salary above its maximum"
        );
    }

    Ok(listing)
}

fn required(value: String, field: &'static str) -> Result<String, ListingViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ListingViolation::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
