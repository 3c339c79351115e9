//! Pure filtering and pagination over an in-memory snapshot of postings.
//!
//! Nothing here performs I/O, so the same snapshot can be re-queried on every keystroke or
//! selector change. Pages are 1-based and never clamped: asking for a page past the end
//! yields no items but still reports the full match count.

use serde::{Deserialize, Serialize};

use super::domain::{EmploymentType, JobPosting, SalaryType};

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Predicate applied after the title query.
pub trait ListingFilter {
    fn matches(&self, job: &JobPosting) -> bool;
}

/// Single selector shared by the price ceiling, salary type, and employment type facets.
///
/// A posting passes when any one axis accepts the raw value. A value that is not a plain
/// decimal simply fails the price axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySelector {
    raw: Option<String>,
    ceiling: Option<f64>,
}

impl CategorySelector {
    pub fn new(category: Option<&str>) -> Self {
        let raw = category
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let ceiling = raw.as_deref().and_then(plain_decimal);
        Self { raw, ceiling }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }
}

/// Accepts only optionally-signed digits with a decimal point, so exponents and
/// `inf`/`NaN` spellings never become a ceiling.
fn plain_decimal(value: &str) -> Option<f64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    value.parse::<f64>().ok().filter(|ceiling| ceiling.is_finite())
}

impl ListingFilter for CategorySelector {
    fn matches(&self, job: &JobPosting) -> bool {
        let Some(raw) = self.raw.as_deref() else {
            return true;
        };

        let within_ceiling = self
            .ceiling
            .is_some_and(|ceiling| job.listing.max_salary <= ceiling);

        within_ceiling
            || job.listing.salary_type.label().eq_ignore_ascii_case(raw)
            || job.listing.employment_type.label().eq_ignore_ascii_case(raw)
    }
}

/// Independent facets combined with AND; unset facets accept everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetFilter {
    pub max_salary: Option<f64>,
    pub salary_type: Option<SalaryType>,
    pub employment_type: Option<EmploymentType>,
}

impl FacetFilter {
    pub fn is_empty(&self) -> bool {
        self.max_salary.is_none() && self.salary_type.is_none() && self.employment_type.is_none()
    }
}

impl ListingFilter for FacetFilter {
    fn matches(&self, job: &JobPosting) -> bool {
        self.max_salary
            .map_or(true, |ceiling| job.listing.max_salary <= ceiling)
            && self
                .salary_type
                .map_or(true, |kind| job.listing.salary_type == kind)
            && self
                .employment_type
                .map_or(true, |kind| job.listing.employment_type == kind)
    }
}

/// One page of matches plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage<'a> {
    pub items: Vec<&'a JobPosting>,
    pub total_count: usize,
}

impl ListingPage<'_> {
    pub fn to_owned_items(&self) -> Vec<JobPosting> {
        self.items.iter().map(|job| (*job).clone()).collect()
    }
}

/// Boundary state the page-navigation control needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNavigation {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageNavigation {
    pub fn new(page: usize, page_size: usize, total_count: usize) -> Self {
        let total_pages = page_count(total_count, page_size);
        Self {
            page,
            page_size,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }
}

pub fn page_count(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_count.div_ceil(page_size)
    }
}

fn title_matches(job: &JobPosting, needle: &str) -> bool {
    needle.is_empty() || job.title().to_lowercase().contains(needle)
}

/// Case-insensitive title search.
pub fn filter_by_title<'a>(jobs: &'a [JobPosting], query: &str) -> Vec<&'a JobPosting> {
    let needle = query.to_lowercase();
    jobs.iter()
        .filter(|job| title_matches(job, &needle))
        .collect()
}

/// Filter by title and the legacy category selector, then slice out `page`.
pub fn select_page<'a>(
    jobs: &'a [JobPosting],
    query: &str,
    category: Option<&str>,
    page: usize,
    page_size: usize,
) -> ListingPage<'a> {
    select_page_with(jobs, query, &CategorySelector::new(category), page, page_size)
}

pub fn select_page_with<'a, F>(
    jobs: &'a [JobPosting],
    query: &str,
    filter: &F,
    page: usize,
    page_size: usize,
) -> ListingPage<'a>
where
    F: ListingFilter + ?Sized,
{
    let needle = query.to_lowercase();
    let matches: Vec<&JobPosting> = jobs
        .iter()
        .filter(|job| title_matches(job, &needle) && filter.matches(job))
        .collect();
    let total_count = matches.len();

    let items = match page_bounds(page, page_size, total_count) {
        Some((start, end)) => matches[start..end].to_vec(),
        None => Vec::new(),
    };

    ListingPage { items, total_count }
}

fn page_bounds(page: usize, page_size: usize, total_count: usize) -> Option<(usize, usize)> {
    if page == 0 || page_size == 0 {
        return None;
    }
    let start = (page - 1).checked_mul(page_size)?;
    if start >= total_count {
        return None;
    }
    let end = start.saturating_add(page_size).min(total_count);
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_handle_edges() {
        assert_eq!(page_bounds(1, 6, 6), Some((0, 6)));
        assert_eq!(page_bounds(2, 6, 6), None);
        assert_eq!(page_bounds(2, 6, 8), Some((6, 8)));
        assert_eq!(page_bounds(0, 6, 8), None);
        assert_eq!(page_bounds(1, 0, 8), None);
        assert_eq!(page_bounds(1, usize::MAX, 8), Some((0, 8)));
        assert_eq!(page_bounds(3, usize::MAX, 8), None);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 6), 0);
        assert_eq!(page_count(6, 6), 1);
        assert_eq!(page_count(7, 6), 2);
        assert_eq!(page_count(7, 0), 0);
    }

    #[test]
    fn blank_category_is_empty() {
        assert!(CategorySelector::new(None).is_empty());
        assert!(CategorySelector::new(Some("   ")).is_empty());
        assert!(!CategorySelector::new(Some("Hourly")).is_empty());
    }
}
