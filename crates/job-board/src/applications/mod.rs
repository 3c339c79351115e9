//! Application intake with the (job, applicant) uniqueness guard, and the owner-scoped
//! aggregation that joins applications back onto postings.

pub mod aggregate;
pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{
    distinct_job_titles, join_with_postings, ApplicationFilter, UNKNOWN_COMPANY,
    UNKNOWN_JOB_TITLE,
};
pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationSubmission, ApplicationView, NewApplication,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError};
