use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{JobId, JobListing};
use super::repository::JobRepository;
use super::service::{BrowseRequest, JobListingService};
use crate::error::AppError;

/// Router builder exposing posting CRUD and the browse endpoint.
pub fn listing_router<J>(service: Arc<JobListingService<J>>) -> Router
where
    J: JobRepository + 'static,
{
    Router::new()
        .route("/post-job", post(post_handler::<J>))
        .route("/all-jobs", get(all_handler::<J>))
        .route("/all-jobs/:id", get(single_handler::<J>))
        .route("/myJobs/:email", get(owned_handler::<J>))
        .route("/update-job/:id", patch(update_handler::<J>))
        .route("/job/:id", delete(delete_handler::<J>))
        .route("/jobs", get(browse_handler::<J>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OwnedJobsQuery {
    #[serde(default)]
    pub(crate) search: Option<String>,
}

pub(crate) async fn post_handler<J>(
    State(service): State<Arc<JobListingService<J>>>,
    payload: Result<Json<JobListing>, JsonRejection>,
) -> Result<Response, AppError>
where
    J: JobRepository + 'static,
{
    let Json(listing) = payload?;
    let posting = service.post(listing)?;
    Ok((StatusCode::OK, Json(posting)).into_response())
}

pub(crate) async fn all_handler<J>(
    State(service): State<Arc<JobListingService<J>>>,
) -> Result<Response, AppError>
where
    J: JobRepository + 'static,
{
    Ok(Json(service.all()?).into_response())
}

pub(crate) async fn single_handler<J>(
    State(service): State<Arc<JobListingService<J>>>,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    J: JobRepository + 'static,
{
    // A missing posting is reported as JSON null, not an error status.
    Ok(Json(service.get(&JobId(id))?).into_response())
}

pub(crate) async fn owned_handler<J>(
    State(service): State<Arc<JobListingService<J>>>,
    Path(email): Path<String>,
    query: Result<Query<OwnedJobsQuery>, QueryRejection>,
) -> Result<Response, AppError>
where
    J: JobRepository + 'static,
{
    let Query(query) = query?;
    let postings = service.owned_by(&email, query.search.as_deref())?;
    Ok(Json(postings).into_response())
}

pub(crate) async fn update_handler<J>(
    State(service): State<Arc<JobListingService<J>>>,
    Path(id): Path<String>,
    payload: Result<Json<JobListing>, JsonRejection>,
) -> Result<Response, AppError>
where
    J: JobRepository + 'static,
{
    let Json(listing) = payload?;
    let posting = service.update(&JobId(id), listing)?;
    Ok(Json(posting).into_response())
}

pub(crate) async fn delete_handler<J>(
    State(service): State<Arc<JobListingService<J>>>,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    J: JobRepository + 'static,
{
    let removed = service.delete(&JobId(id))?;
    Ok(Json(json!({
        "status": removed,
        "deletedCount": usize::from(removed),
    }))
    .into_response())
}

pub(crate) async fn browse_handler<J>(
    State(service): State<Arc<JobListingService<J>>>,
    request: Result<Query<BrowseRequest>, QueryRejection>,
) -> Result<Response, AppError>
where
    J: JobRepository + 'static,
{
    let Query(request) = request?;
    Ok(Json(service.browse(&request)?).into_response())
}
