//! Job postings: the browse filter/pagination engine and the posting service around it.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use domain::{EmploymentType, ExperienceLevel, JobId, JobListing, JobPosting, SalaryType};
pub use filter::{
    filter_by_title, page_count, select_page, select_page_with, CategorySelector, FacetFilter,
    ListingFilter, ListingPage, PageNavigation, DEFAULT_PAGE_SIZE,
};
pub use repository::JobRepository;
pub use router::listing_router;
pub use seed::{load_entries, parse_entries, snapshot, SeedEntry, SeedError};
pub use service::{
    BrowseRequest, BrowseResponse, JobListingService, ListingServiceError, ListingViolation,
};
