// crates/server/src/lib.rs
//! Datalift API server library.
//!
//! This crate provides the Axum-based HTTP server for the datalift
//! extraction service: the `/api/v1` surface over the job store, plus the
//! background adapter that talks to the third-party contact source.

pub mod error;
pub mod extraction;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extraction::{ExtractionClient, DEFAULT_UPSTREAM_URL};
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - the `/api/v1` routes (health, scan lifecycle, job listing/statistics)
/// - CORS for development (allows any origin)
/// - request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
