// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use datalift_core::api::ErrorResponse;
use datalift_core::JobStatus;
use datalift_db::DbError;

/// API error types that map to HTTP status codes.
///
/// Extraction failures are deliberately absent: the adapter records them on
/// the job row (`failed` + `error_message`), never through a response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid extraction request: {0}")]
    InvalidConfig(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Job not found: {0}")]
    JobNotFound(Uuid),

    #[error("Job {job_id} is not complete (status: {status})")]
    NotReady { job_id: Uuid, status: JobStatus },

    #[error("Cannot cancel job with status: {status}")]
    InvalidTransition { job_id: Uuid, status: JobStatus },

    #[error("Cannot remove job with status: {status}")]
    NotRemovable { job_id: Uuid, status: JobStatus },

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::InvalidConfig(msg) => {
                tracing::warn!(message = %msg, "Rejected start request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Invalid extraction request", msg.clone()),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(message = %msg, "Bad request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Bad request", msg.clone()),
                )
            }
            ApiError::JobNotFound(id) => {
                tracing::warn!(job_id = %id, "Job not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Job not found", format!("Job ID {id} does not exist")),
                )
            }
            ApiError::NotReady { job_id, status } => {
                tracing::warn!(job_id = %job_id, status = %status, "Results not ready");
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::with_details(
                        "Job is not complete",
                        format!("Job is still {status}. Results are not ready yet."),
                    ),
                )
            }
            ApiError::InvalidTransition { job_id, status } => {
                tracing::warn!(job_id = %job_id, status = %status, "Illegal lifecycle action");
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new(format!("Cannot cancel job with status: {status}")),
                )
            }
            ApiError::NotRemovable { job_id, status } => {
                tracing::warn!(job_id = %job_id, status = %status, "Remove rejected for live job");
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::with_details(
                        "Job is not removable",
                        format!("Job is still {status}; cancel it before removing"),
                    ),
                )
            }
            ApiError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details("Database error", err.to_string()),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
