// crates/client/src/error.rs

use thiserror::Error;
use uuid::Uuid;

use datalift_core::JobStatus;

/// Errors surfaced by the harness API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The polling budget ran out while the job was still live.
    #[error(
        "job {job_id} did not reach {expected:?} within {attempts} attempts \
         (last status: {last_status:?})"
    )]
    PollTimeout {
        job_id: Uuid,
        expected: Vec<JobStatus>,
        attempts: u32,
        last_status: Option<JobStatus>,
    },
}

impl ClientError {
    /// HTTP status of an API-level error, if this is one.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
