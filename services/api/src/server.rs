use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository, InMemoryJobRepository};
use crate::routes::with_board_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_board::applications::ApplicationService;
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::listings::{load_entries, JobListingService};
use job_board::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let jobs = Arc::new(InMemoryJobRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let listing_service = Arc::new(JobListingService::new(
        jobs.clone(),
        config.listings.page_size,
    ));
    let application_service = Arc::new(ApplicationService::new(jobs, applications));

    if let Some(path) = config.listings.seed_file.as_deref() {
        let imported = listing_service.import(load_entries(path)?)?;
        info!(path = %path.display(), imported, "seeded job listings");
    }

    let app = with_board_routes(listing_service, application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, page_size = config.listings.page_size, "job board ready");

    axum::serve(listener, app).await?;
    Ok(())
}
