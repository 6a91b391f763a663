// crates/server/src/extraction/client.rs
//! Reqwest client for the upstream contact source.
//!
//! The base URL is constructor-injected so tests can point it at a local
//! mock server; retry and backoff toward the real service are the
//! upstream SDK's concern, not ours.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use datalift_core::ExtractedContact;

/// Default production endpoint of the contact source.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.hubapi.com";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to fetch data from service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream rejected the request: HTTP {status}")]
    Status { status: reqwest::StatusCode },
}

/// HTTP client for the third-party extraction service.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ExtractionError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Fetch one batch of contacts with the caller's bearer token.
    pub async fn fetch_contacts(
        &self,
        api_token: &str,
    ) -> Result<Vec<ExtractedContact>, ExtractionError> {
        let url = format!("{}/crm/v3/objects/contacts", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(api_token)
            .query(&[("limit", "100"), ("properties", "email,firstname,lastname")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Status { status });
        }

        let envelope: ContactsEnvelope = response.json().await?;
        Ok(envelope
            .results
            .into_iter()
            .map(|contact| ExtractedContact {
                email: contact.properties.email.unwrap_or_default(),
                first_name: contact.properties.firstname.unwrap_or_default(),
                last_name: contact.properties.lastname.unwrap_or_default(),
                id_from_service: contact.id,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct ContactsEnvelope {
    #[serde(default)]
    results: Vec<UpstreamContact>,
}

#[derive(Debug, Deserialize)]
struct UpstreamContact {
    #[serde(default)]
    id: String,
    #[serde(default)]
    properties: UpstreamProperties,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamProperties {
    email: Option<String>,
    firstname: Option<String>,
    lastname: Option<String>,
}
