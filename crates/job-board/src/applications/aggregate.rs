use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::domain::{ApplicationRecord, ApplicationView};
use crate::listings::{JobId, JobPosting};

pub const UNKNOWN_JOB_TITLE: &str = "Unknown Job";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Attach posting metadata to each application, newest first.
///
/// Applications whose posting is absent from `postings` keep their place in the output with
/// placeholder metadata.
pub fn join_with_postings(
    postings: &[JobPosting],
    applications: Vec<ApplicationRecord>,
) -> Vec<ApplicationView> {
    let index: HashMap<&JobId, &JobPosting> =
        postings.iter().map(|posting| (&posting.id, posting)).collect();

    let mut views: Vec<ApplicationView> = applications
        .into_iter()
        .map(|application| {
            let (job_title, company_name) = match index.get(&application.job_id) {
                Some(posting) => (
                    posting.listing.title.clone(),
                    posting.listing.company_name.clone(),
                ),
                None => (UNKNOWN_JOB_TITLE.to_string(), UNKNOWN_COMPANY.to_string()),
            };
            ApplicationView {
                application,
                job_title,
                company_name,
            }
        })
        .collect();

    sort_newest_first(&mut views, |view| &view.application);
    views
}

/// Stable sort by `applied_at`, most recent first.
pub(crate) fn sort_newest_first<T>(items: &mut [T], record: impl Fn(&T) -> &ApplicationRecord) {
    items.sort_by(|a, b| record(b).applied_at.cmp(&record(a).applied_at));
}

/// Employer-side narrowing of an aggregated application list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicationFilter {
    /// Case-insensitive match on applicant name, email, job title or company.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact job title to keep.
    #[serde(default, rename = "job")]
    pub job_title: Option<String>,
}

impl ApplicationFilter {
    pub fn matches(&self, view: &ApplicationView) -> bool {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        let matches_search = search.map_or(true, |term| {
            [
                view.application.applicant_name.as_str(),
                view.application.applicant_email.as_str(),
                view.job_title.as_str(),
                view.company_name.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
        });

        let matches_job = self
            .job_title
            .as_deref()
            .filter(|title| !title.is_empty())
            .map_or(true, |title| view.job_title == title);

        matches_search && matches_job
    }

    pub fn apply(&self, views: Vec<ApplicationView>) -> Vec<ApplicationView> {
        views.into_iter().filter(|view| self.matches(view)).collect()
    }
}

/// Job titles present in `views`, in first-seen order.
pub fn distinct_job_titles(views: &[ApplicationView]) -> Vec<&str> {
    let mut seen = HashSet::new();
    views
        .iter()
        .map(|view| view.job_title.as_str())
        .filter(|title| seen.insert(*title))
        .collect()
}
