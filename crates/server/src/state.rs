// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use datalift_db::Database;

use crate::extraction::ExtractionClient;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Job store handle.
    pub db: Database,
    /// Boundary client to the third-party contact source.
    pub extraction: Arc<ExtractionClient>,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(db: Database, extraction: ExtractionClient) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            db,
            extraction: Arc::new(extraction),
        })
    }

    /// Seconds since the server started.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
