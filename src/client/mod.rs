use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::form::ValidationError;
use crate::models::PropertyListing;

/// Path of the lead intake endpoint, relative to the base URL
pub const LEADS_PATH: &str = "/property-lead/api/leads";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("listing is incomplete: {0}")]
    Invalid(#[from] ValidationError),
    #[error("could not reach the lead service: {0}")]
    NetworkFailure(#[source] reqwest::Error),
    #[error("lead service rejected the listing with status {status}")]
    RemoteRejected { status: StatusCode },
}

/// Destination for finished listings
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    /// Send one listing. Called at most once per submit; never retried.
    async fn submit_lead(&self, listing: &PropertyListing) -> Result<(), SubmitError>;

    /// Where listings are sent, for logging
    fn endpoint(&self) -> &str;
}

/// HTTP client for the remote lead service
pub struct LeadClient {
    client: Client,
    endpoint: String,
}

impl LeadClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client posting to `{base_url}/property-lead/api/leads`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), LEADS_PATH);
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl LeadSubmitter for LeadClient {
    async fn submit_lead(&self, listing: &PropertyListing) -> Result<(), SubmitError> {
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(listing)
            .send()
            .await
            .map_err(|e| {
                warn!("Lead submission failed: {}", e);
                SubmitError::NetworkFailure(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Lead service returned status: {}", status);
            return Err(SubmitError::RemoteRejected { status });
        }

        info!("Lead accepted by {} ({})", self.endpoint, status);
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
