// crates/core/src/api.rs
//! Wire-format types shared by the API server and the harness client.
//!
//! Every endpoint has an explicit schema struct; bodies are validated at the
//! boundary before reaching the lifecycle engine.

use serde::{Deserialize, Serialize};

use crate::job::{ExtractedContact, ExtractionJob};

/// Body of `POST /api/v1/scan/start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartScanRequest {
    pub api_token: String,
}

/// Structured JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Response of `GET /api/v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Paginated envelope for extracted records
/// (`GET /api/v1/scan/result/{job_id}`).
///
/// `next` is an absolute path for the following page, or null on the last
/// page; clients resolve it against their base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPage {
    pub data: Vec<ExtractedContact>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub next: Option<String>,
}

/// Paginated envelope for job listings (`GET /api/v1/jobs/jobs`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListPage {
    pub data: Vec<ExtractionJob>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub next: Option<String>,
}

/// Aggregate per-status counts (`GET /api/v1/jobs/statistics`).
///
/// The five buckets partition `total_jobs`: they always sum to the row count
/// of the job table at the moment of the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatistics {
    pub total_jobs: i64,
    pub pending_jobs: i64,
    pub in_progress_jobs: i64,
    pub completed_jobs: i64,
    pub failed_jobs: i64,
    pub cancelled_jobs: i64,
    /// Mean `end_time - start_time` over completed jobs, in seconds.
    pub average_extraction_time: Option<f64>,
}

impl JobStatistics {
    /// Sum of the per-status buckets; equals `total_jobs` by construction.
    pub fn bucket_sum(&self) -> i64 {
        self.pending_jobs
            + self.in_progress_jobs
            + self.completed_jobs
            + self.failed_jobs
            + self.cancelled_jobs
    }
}
