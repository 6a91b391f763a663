// crates/server/src/routes/mod.rs
// API route modules for the /api/v1 surface.

pub mod health;
pub mod jobs;
pub mod scan;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Default page size for result and listing endpoints.
pub(crate) const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound a client may request per page.
pub(crate) const MAX_PAGE_SIZE: i64 = 100;

/// Normalize optional limit/offset query values into page bounds.
pub(crate) fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

/// Assemble all API routes (mounted under `/api/v1` by `create_app`).
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(scan::router())
        .merge(jobs::router())
}
