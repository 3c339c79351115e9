use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::aggregate::{distinct_job_titles, ApplicationFilter};
use super::domain::ApplicationSubmission;
use super::repository::ApplicationRepository;
use super::service::{ApplicationService, ApplicationServiceError};
use crate::error::{failure, AppError};
use crate::listings::{JobId, JobRepository};

/// Router builder exposing intake and employer review endpoints.
pub fn application_router<J, A>(service: Arc<ApplicationService<J, A>>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route("/apply-job", post(submit_handler::<J, A>))
        .route("/my-applications/:email", get(owner_handler::<J, A>))
        .route(
            "/my-applications/:email/job-titles",
            get(job_titles_handler::<J, A>),
        )
        .route("/job-applications/:job_id", get(job_handler::<J, A>))
        .with_state(service)
}

pub(crate) async fn submit_handler<J, A>(
    State(service): State<Arc<ApplicationService<J, A>>>,
    payload: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match service.submit(submission) {
        Ok(record) => {
            let payload = json!({
                "status": true,
                "message": "Application submitted successfully",
                "result": record,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err @ ApplicationServiceError::Duplicate { .. }) => {
            failure(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(ApplicationServiceError::Validation(violation)) => {
            failure(StatusCode::UNPROCESSABLE_ENTITY, violation.to_string())
        }
        Err(ApplicationServiceError::Repository(err)) => {
            error!(error = %err, "error submitting application");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub(crate) async fn owner_handler<J, A>(
    State(service): State<Arc<ApplicationService<J, A>>>,
    Path(email): Path<String>,
    filter: Result<Query<ApplicationFilter>, QueryRejection>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let filter = match filter {
        Ok(Query(filter)) => filter,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match service.for_owner(&email) {
        Ok(views) => Json(filter.apply(views)).into_response(),
        Err(err) => fetch_failure(err),
    }
}

/// Options for the employer's job selector: distinct titles among their applications.
pub(crate) async fn job_titles_handler<J, A>(
    State(service): State<Arc<ApplicationService<J, A>>>,
    Path(email): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.for_owner(&email) {
        Ok(views) => Json(distinct_job_titles(&views)).into_response(),
        Err(err) => fetch_failure(err),
    }
}

pub(crate) async fn job_handler<J, A>(
    State(service): State<Arc<ApplicationService<J, A>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.for_job(&JobId(job_id)) {
        Ok(records) => Json(records).into_response(),
        Err(err) => fetch_failure(err),
    }
}

fn fetch_failure(err: ApplicationServiceError) -> Response {
    error!(error = %err, "error fetching applications");
    failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to fetch applications",
    )
}
