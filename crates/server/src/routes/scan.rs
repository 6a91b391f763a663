// crates/server/src/routes/scan.rs
//! Scan lifecycle endpoints.
//!
//! - POST   /scan/start            — accept a job, kick off extraction
//! - GET    /scan/status/{job_id}  — current job snapshot
//! - GET    /scan/result/{job_id}  — paginated records of a completed job
//! - POST   /scan/cancel/{job_id}  — cancel a pending/in-progress job
//! - DELETE /scan/remove/{job_id}  — delete a terminal job and its records

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use datalift_core::api::{ResultPage, StartScanRequest};
use datalift_core::{ExtractedContact, ExtractionJob, JobStatus};
use datalift_db::{CancelOutcome, RemoveOutcome};

use crate::error::{ApiError, ApiResult};
use crate::extraction::{self, spawn_extraction};
use crate::routes::page_bounds;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    limit: Option<i64>,
    offset: Option<i64>,
}

/// POST /api/v1/scan/start — validate the token, create a `pending` job,
/// spawn extraction, and answer 202 immediately.
async fn start_scan(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StartScanRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ExtractionJob>)> {
    let Json(request) = body.map_err(|_| {
        ApiError::InvalidConfig(
            "API token is required. Invalid or missing API token provided.".to_string(),
        )
    })?;
    extraction::validate_api_token(&request.api_token).map_err(ApiError::InvalidConfig)?;

    let job = state.db.create_job().await?;
    tracing::info!(job_id = %job.job_id, "extraction job accepted");
    spawn_extraction(
        state.db.clone(),
        Arc::clone(&state.extraction),
        job.job_id,
        request.api_token,
    );

    Ok((StatusCode::ACCEPTED, Json(job)))
}

/// GET /api/v1/scan/status/{job_id} — current snapshot of one job.
async fn job_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<ExtractionJob>> {
    let job = state
        .db
        .get_job(job_id)
        .await?
        .ok_or(ApiError::JobNotFound(job_id))?;
    Ok(Json(job))
}

/// GET /api/v1/scan/result/{job_id} — paginated records of a completed job.
///
/// Any non-`completed` status is a 409, never an empty result set.
async fn job_result(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ResultPage>> {
    let job = state
        .db
        .get_job(job_id)
        .await?
        .ok_or(ApiError::JobNotFound(job_id))?;
    if job.status != JobStatus::Completed {
        return Err(ApiError::NotReady {
            job_id,
            status: job.status,
        });
    }

    let (limit, offset) = page_bounds(query.limit, query.offset);
    let records_page = state.db.job_records(job_id, limit, offset).await?;
    let data: Vec<ExtractedContact> = records_page.records.into_iter().map(Into::into).collect();
    let next = (offset + limit < records_page.total).then(|| {
        format!(
            "/api/v1/scan/result/{job_id}?limit={limit}&offset={}",
            offset + limit
        )
    });

    Ok(Json(ResultPage {
        data,
        total: records_page.total,
        limit,
        offset,
        next,
    }))
}

/// POST /api/v1/scan/cancel/{job_id} — cancel a live job.
///
/// Cancelling an already-terminal job is a 409, not a no-op: the second
/// cancel of the same job fails.
async fn cancel_scan(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<ExtractionJob>> {
    match state.db.cancel_job(job_id).await? {
        CancelOutcome::Cancelled(job) => {
            tracing::info!(job_id = %job_id, "job cancelled");
            Ok(Json(job))
        }
        CancelOutcome::AlreadyTerminal(status) => {
            Err(ApiError::InvalidTransition { job_id, status })
        }
        CancelOutcome::NotFound => Err(ApiError::JobNotFound(job_id)),
    }
}

/// DELETE /api/v1/scan/remove/{job_id} — delete a terminal job and all of
/// its records. Live jobs must be cancelled first.
async fn remove_scan(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    match state.db.remove_job(job_id).await? {
        RemoveOutcome::Removed => {
            tracing::info!(job_id = %job_id, "job removed");
            Ok(StatusCode::NO_CONTENT)
        }
        RemoveOutcome::NotRemovable(status) => Err(ApiError::NotRemovable { job_id, status }),
        RemoveOutcome::NotFound => Err(ApiError::JobNotFound(job_id)),
    }
}

/// Build the scan router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/scan/start", post(start_scan))
        .route("/scan/status/{job_id}", get(job_status))
        .route("/scan/result/{job_id}", get(job_result))
        .route("/scan/cancel/{job_id}", post(cancel_scan))
        .route("/scan/remove/{job_id}", delete(remove_scan))
}
