//! Page fetching with bounded retry
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 2xx | Return body |
//! | HTTP 429 | Retry |
//! | HTTP 5xx | Retry |
//! | Other HTTP status | Fail immediately |
//! | Timeout / connection error | Retry |
//!
//! Attempts are separated by a fixed delay. After `max_retries` extra
//! attempts the last failure is returned as [`HistorianError::Fetch`].

use crate::config::FetchConfig;
use crate::HistorianError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a single fetch attempt
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        status_code: u16,
        /// Whether another attempt may succeed
        retryable: bool,
    },

    /// Network error (connection refused, timeout, truncated body, ...)
    NetworkError { error: String },
}

/// How often and how patiently a failed fetch is repeated
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Extra attempts after the first
    pub max_retries: u32,

    /// Pause between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }
}

/// Performs one GET request and classifies the outcome
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `query` - Query parameters appended to the URL
pub async fn fetch_page(client: &Client, url: &str, query: &[(&str, String)]) -> FetchResult {
    let response = match client.get(url).query(query).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            retryable: status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Fetches a page, retrying transient failures according to `policy`
///
/// # Returns
///
/// * `Ok(String)` - The page body
/// * `Err(HistorianError::HttpStatus)` - A status that retrying cannot fix
/// * `Err(HistorianError::Fetch)` - Every attempt failed
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    policy: &RetryPolicy,
) -> Result<String, HistorianError> {
    let attempts = policy.max_retries + 1;
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match fetch_page(client, url, query).await {
            FetchResult::Success { final_url, body } => {
                tracing::trace!("Fetched {} ({} bytes)", final_url, body.len());
                return Ok(body);
            }
            FetchResult::HttpError {
                status_code,
                retryable: false,
            } => {
                return Err(HistorianError::HttpStatus {
                    url: url.to_string(),
                    status: status_code,
                });
            }
            FetchResult::HttpError { status_code, .. } => {
                last_error = format!("HTTP {}", status_code);
            }
            FetchResult::NetworkError { error } => {
                last_error = error;
            }
        }

        if attempt < attempts {
            tracing::warn!(
                "Attempt {}/{} for {} failed ({}), retrying in {:?}",
                attempt,
                attempts,
                url,
                last_error,
                policy.delay
            );
            tokio::time::sleep(policy.delay).await;
        }
    }

    Err(HistorianError::Fetch {
        url: url.to_string(),
        attempts,
        message: last_error,
    })
}
