// crates/server/src/routes/jobs.rs
//! Job listing and statistics endpoints.
//!
//! - GET /jobs/jobs       — paginated listing, filterable by status
//! - GET /jobs/statistics — per-status aggregate counts

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use datalift_core::api::{JobListPage, JobStatistics};
use datalift_core::JobStatus;
use datalift_db::JobFilter;

use crate::error::{ApiError, ApiResult};
use crate::routes::page_bounds;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    status: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// GET /api/v1/jobs/jobs — list jobs newest-first.
///
/// An unknown `status` value is a 400, not a silently empty page.
async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<JobListPage>> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<JobStatus>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let (limit, offset) = page_bounds(query.limit, query.offset);

    let page = state
        .db
        .list_jobs(JobFilter {
            status,
            limit,
            offset,
        })
        .await?;

    let next = (offset + limit < page.total).then(|| {
        let mut url = format!("/api/v1/jobs/jobs?limit={limit}&offset={}", offset + limit);
        if let Some(status) = status {
            url.push_str(&format!("&status={status}"));
        }
        url
    });

    Ok(Json(JobListPage {
        data: page.jobs,
        total: page.total,
        limit,
        offset,
        next,
    }))
}

/// GET /api/v1/jobs/statistics — aggregate counts straight off the table.
async fn statistics(State(state): State<Arc<AppState>>) -> ApiResult<Json<JobStatistics>> {
    Ok(Json(state.db.statistics().await?))
}

/// Build the jobs router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs/jobs", get(list_jobs))
        .route("/jobs/statistics", get(statistics))
}
