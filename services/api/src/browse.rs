use chrono::Utc;
use clap::Args;
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::listings::{load_entries, select_page, snapshot, BrowseResponse, PageNavigation};
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct BrowseArgs {
    /// JSON export of postings (defaults to JOBS_SEED_FILE)
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Case-insensitive title search
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Price ceiling, salary type, or employment type
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// 1-based page to show
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Items per page (defaults to JOBS_PAGE_SIZE)
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
    /// Print the page as JSON instead of a text listing
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args
        .file
        .clone()
        .or(config.listings.seed_file)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "no listings export given; pass --file or set JOBS_SEED_FILE",
            )
        })?;
    let page_size = args.page_size.unwrap_or(config.listings.page_size);

    let jobs = snapshot(load_entries(&path)?, Utc::now());
    let response = browse_snapshot(&jobs, &args, page_size);

    if args.json {
        let body = serde_json::to_string_pretty(&response).map_err(io::Error::from)?;
        println!("{body}");
    } else {
        print!("{}", render_page(&response));
    }
    Ok(())
}

fn browse_snapshot(
    jobs: &[job_board::listings::JobPosting],
    args: &BrowseArgs,
    page_size: usize,
) -> BrowseResponse {
    let selected = select_page(
        jobs,
        args.query.as_deref().unwrap_or_default(),
        args.category.as_deref(),
        args.page,
        page_size,
    );
    BrowseResponse {
        items: selected.to_owned_items(),
        total_count: selected.total_count,
        navigation: PageNavigation::new(args.page, page_size, selected.total_count),
    }
}

fn render_page(response: &BrowseResponse) -> String {
    let navigation = &response.navigation;
    let mut out = format!(
        "{} matching job(s) | page {} of {}\n",
        response.total_count,
        navigation.page,
        navigation.total_pages.max(1)
    );
    if response.items.is_empty() {
        out.push_str("No jobs on this page.\n");
    }
    for job in &response.items {
        let listing = &job.listing;
        out.push_str(&format!(
            "- [{}] {} at {} | {}-{} {} | {} | {}\n",
            job.id,
            listing.title,
            listing.company_name,
            listing.min_salary,
            listing.max_salary,
            listing.salary_type.label(),
            listing.employment_type.label(),
            listing.location,
        ));
    }
    let mut controls = Vec::new();
    if navigation.has_previous {
        controls.push(format!("--page {} for previous", navigation.page - 1));
    }
    if navigation.has_next {
        controls.push(format!("--page {} for next", navigation.page + 1));
    }
    if !controls.is_empty() {
        out.push_str(&format!("({})\n", controls.join(", ")));
    }
    out
}
