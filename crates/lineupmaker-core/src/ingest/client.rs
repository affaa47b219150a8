//! HTTP fetching of a published roster sheet.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use tracing::{debug, warn};

use crate::models::Person;

use super::{parse_roster_str, IngestError};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Fetches roster sheets over HTTP.
/// Clone is cheap; reqwest::Client shares its connection pool.
#[derive(Clone)]
pub struct RosterClient {
    client: Client,
}

impl RosterClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other statuses.
    async fn check_response_for_retry(response: reqwest::Response) -> Result<Option<reqwest::Response>> {
        let status = response.status();
        if status.is_success() {
            Ok(Some(response))
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Ok(None)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(IngestError::from_status(status, &body).into())
        }
    }

    /// Download the raw CSV text at `url`.
    pub async fn fetch_csv(&self, url: &str) -> Result<String> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(url)
                .header(header::ACCEPT, "text/csv, text/plain;q=0.9, */*;q=0.5")
                .send()
                .await
                .map_err(IngestError::from)
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    let content_type = response
                        .headers()
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok());
                    IngestError::check_content_type(content_type)
                        .with_context(|| format!("Roster URL {} is not a published CSV", url))?;
                    return response
                        .text()
                        .await
                        .map_err(IngestError::from)
                        .with_context(|| format!("Failed to read roster body from {}", url));
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(IngestError::RateLimited.into());
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2;
                }
            }
        }
    }

    /// Download and parse the roster sheet at `url`.
    pub async fn fetch_roster(&self, url: &str) -> Result<Vec<Person>> {
        let text = self.fetch_csv(url).await?;
        debug!(url = url, bytes = text.len(), "Fetched roster sheet");
        let people = parse_roster_str(&text)
            .with_context(|| format!("Failed to parse roster sheet from {}", url))?;
        Ok(people)
    }
}
