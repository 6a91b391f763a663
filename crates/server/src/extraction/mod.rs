// crates/server/src/extraction/mod.rs
//! Boundary to the third-party extraction service.
//!
//! The rest of the server only consumes three outcomes from this module:
//! records were extracted, extraction completed, or extraction failed. All
//! three land on the job row through the store's guarded transitions.

pub mod client;
pub mod runner;

pub use client::{ExtractionClient, ExtractionError, DEFAULT_UPSTREAM_URL};
pub use runner::{run_extraction, spawn_extraction};

/// Validate the shape of a service API token before any job is created.
///
/// Upstream personal-access tokens are `pat-` prefixed; anything else is
/// rejected at the boundary so no job row is ever written for it.
pub fn validate_api_token(token: &str) -> Result<(), String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("API token is required. Invalid or missing API token provided.".to_string());
    }
    if token.len() < 10 {
        return Err("Invalid API token format".to_string());
    }
    if !token.starts_with("pat-") {
        return Err(
            "Invalid API token format. Unauthorized: authentication failed. \
             Token should start with 'pat-'"
                .to_string(),
        );
    }
    Ok(())
}
