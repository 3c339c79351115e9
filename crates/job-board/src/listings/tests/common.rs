use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::listings::domain::{
    EmploymentType, ExperienceLevel, JobId, JobListing, JobPosting, SalaryType,
};
use crate::listings::repository::JobRepository;
use crate::listings::service::JobListingService;
use crate::store::RepositoryError;

pub(crate) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn listing(title: &str) -> JobListing {
    JobListing {
        title: title.to_string(),
        company_name: "Acme Labs".to_string(),
        company_logo: None,
        min_salary: 60.0,
        max_salary: 90.0,
        salary_type: SalaryType::Yearly,
        location: "Colombo".to_string(),
        employment_type: EmploymentType::FullTime,
        experience_level: ExperienceLevel::MidLevel,
        posted_by: "hiring@acme.test".to_string(),
        posting_date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
        skills: BTreeSet::from(["Rust".to_string()]),
        description: "Build things.".to_string(),
    }
}

pub(crate) fn listing_with(
    title: &str,
    max_salary: f64,
    salary_type: SalaryType,
    employment_type: EmploymentType,
) -> JobListing {
    JobListing {
        max_salary,
        min_salary: (max_salary / 2.0).floor(),
        salary_type,
        employment_type,
        ..listing(title)
    }
}

pub(crate) fn owned_listing(title: &str, owner: &str, company: &str) -> JobListing {
    JobListing {
        posted_by: owner.to_string(),
        company_name: company.to_string(),
        ..listing(title)
    }
}

/// Postings with sequential ids, as a client-side snapshot would hold them.
pub(crate) fn postings(listings: Vec<JobListing>) -> Vec<JobPosting> {
    listings
        .into_iter()
        .enumerate()
        .map(|(index, listing)| JobPosting {
            id: JobId(format!("job-{:06}", index + 1)),
            listing,
            created_at: at(8),
        })
        .collect()
}

/// Eight postings, three of them engineering roles.
pub(crate) fn mixed_board() -> Vec<JobPosting> {
    postings(vec![
        listing_with("Senior Engineer", 120.0, SalaryType::Yearly, EmploymentType::FullTime),
        listing_with("Product Designer", 80.0, SalaryType::Yearly, EmploymentType::FullTime),
        listing_with("Data engineer", 45.0, SalaryType::Hourly, EmploymentType::Contract),
        listing_with("Support Agent", 30.0, SalaryType::Hourly, EmploymentType::PartTime),
        listing_with("Marketing Lead", 40.0, SalaryType::Monthly, EmploymentType::FullTime),
        listing_with("ENGINEERING Manager", 150.0, SalaryType::Yearly, EmploymentType::FullTime),
        listing_with("Copywriter", 25.0, SalaryType::Hourly, EmploymentType::Freelance),
        listing_with("Office Assistant", 20.0, SalaryType::Monthly, EmploymentType::Temporary),
    ])
}

#[derive(Default)]
pub(crate) struct MemoryJobs {
    postings: Mutex<Vec<JobPosting>>,
    sequence: AtomicU64,
}

impl MemoryJobs {
    pub(crate) fn len(&self) -> usize {
        self.postings.lock().expect("jobs mutex poisoned").len()
    }
}

impl JobRepository for MemoryJobs {
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
        self.postings
            .lock()
            .expect("jobs mutex poisoned")
            .push(posting.clone());
        Ok(posting)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("jobs mutex poisoned");
        Ok(guard.iter().find(|posting| &posting.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Ok(self.postings.lock().expect("jobs mutex poisoned").clone())
    }

    fn owned_by(&self, owner_email: &str) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("jobs mutex poisoned");
        Ok(guard
            .iter()
            .filter(|posting| posting.is_owned_by(owner_email))
            .cloned()
            .collect())
    }

    fn update(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = self.postings.lock().expect("jobs mutex poisoned");
        match guard.iter_mut().find(|stored| stored.id == posting.id) {
            Some(stored) => {
                *stored = posting;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &JobId) -> Result<bool, RepositoryError> {
        let mut guard = self.postings.lock().expect("jobs mutex poisoned");
        let before = guard.len();
        guard.retain(|posting| &posting.id != id);
        Ok(guard.len() != before)
    }
}

pub(crate) struct UnavailableJobs;

impl JobRepository for UnavailableJobs {
    fn insert(
        &self,
        _listing: JobListing,
        _created_at: DateTime<Utc>,
    ) -> Result<JobPosting, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn owned_by(&self, _owner_email: &str) -> Result<Vec<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _posting: JobPosting) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &JobId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(crate) fn build_service() -> (JobListingService<MemoryJobs>, Arc<MemoryJobs>) {
    let repository = Arc::new(MemoryJobs::default());
    let service = JobListingService::new(repository.clone(), 6);
    (service, repository)
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
