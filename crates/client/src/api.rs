// crates/client/src/api.rs
//! Typed client for the Data Extraction Service API.

use std::time::Duration;

use reqwest::Response;
use tracing::debug;
use uuid::Uuid;

use datalift_core::api::{
    ErrorResponse, HealthResponse, JobListPage, JobStatistics, ResultPage, StartScanRequest,
};
use datalift_core::{ExtractionJob, JobStatus};

use crate::error::ClientError;
use crate::settings::Settings;

/// Bounds for the status polling loop.
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

/// Client for the Data Extraction Service API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(settings.api_base_url.clone(), settings.api_timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a non-success response into `ClientError::Api`, decoding the
    /// service's error body when it has one.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => match body.details {
                Some(details) => format!("{}: {details}", body.error),
                None => body.error,
            },
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// GET /api/v1/health
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.url("/api/v1/health")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// POST /api/v1/scan/start
    pub async fn start_extraction(&self, api_token: &str) -> Result<ExtractionJob, ClientError> {
        let response = self
            .http
            .post(self.url("/api/v1/scan/start"))
            .json(&StartScanRequest {
                api_token: api_token.to_string(),
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// GET /api/v1/scan/status/{job_id}
    pub async fn job_status(&self, job_id: Uuid) -> Result<ExtractionJob, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/v1/scan/status/{job_id}")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// GET /api/v1/scan/result/{job_id}
    pub async fn job_result(
        &self,
        job_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<ResultPage, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        let response = self
            .http
            .get(self.url(&format!("/api/v1/scan/result/{job_id}")))
            .query(&query)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// POST /api/v1/scan/cancel/{job_id}
    pub async fn cancel_job(&self, job_id: Uuid) -> Result<ExtractionJob, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/api/v1/scan/cancel/{job_id}")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// DELETE /api/v1/scan/remove/{job_id} (204 on success, no body)
    pub async fn remove_job(&self, job_id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/v1/scan/remove/{job_id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// GET /api/v1/jobs/jobs
    pub async fn list_jobs(
        &self,
        status: Option<JobStatus>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<JobListPage, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        let response = self
            .http
            .get(self.url("/api/v1/jobs/jobs"))
            .query(&query)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// GET /api/v1/jobs/statistics
    pub async fn statistics(&self) -> Result<JobStatistics, ClientError> {
        let response = self
            .http
            .get(self.url("/api/v1/jobs/statistics"))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Poll `job_status` until it reaches one of `expected`, sleeping
    /// `options.interval` between attempts.
    ///
    /// Exhausting the attempt budget yields `PollTimeout`, an error value
    /// rather than a panic. The loop itself has no wall-clock deadline;
    /// callers that want one race this future against their own timer
    /// (e.g. `tokio::time::timeout`).
    pub async fn poll_job_status(
        &self,
        job_id: Uuid,
        expected: &[JobStatus],
        options: PollOptions,
    ) -> Result<ExtractionJob, ClientError> {
        let mut last_status = None;
        for attempt in 1..=options.max_attempts {
            let job = self.job_status(job_id).await?;
            if expected.contains(&job.status) {
                debug!(job_id = %job_id, status = %job.status, attempt, "job reached expected status");
                return Ok(job);
            }
            debug!(
                job_id = %job_id, status = %job.status,
                attempt, max_attempts = options.max_attempts,
                "job still live"
            );
            last_status = Some(job.status);
            if attempt < options.max_attempts {
                tokio::time::sleep(options.interval).await;
            }
        }

        Err(ClientError::PollTimeout {
            job_id,
            expected: expected.to_vec(),
            attempts: options.max_attempts,
            last_status,
        })
    }
}
