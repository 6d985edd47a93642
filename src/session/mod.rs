//! Authenticated access to Kattis
//!
//! This module contains everything that talks to the network:
//! - Building the cookie-carrying HTTP client
//! - Logging in with a CSRF-protected form
//! - Fetching pages with bounded retry
//! - The [`PageSource`] seam the history pipeline reads pages through

mod client;
mod fetcher;
mod login;

pub use client::build_http_client;
pub use fetcher::{fetch_page, fetch_with_retry, FetchResult, RetryPolicy};
pub use login::{login, LOGIN_FAILURE_MARKER};

use crate::config::Config;
use crate::history::Mirror;
use crate::HistorianError;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::future::Future;

/// Source of raw listing and submission pages
///
/// The history pipeline only ever reads pages through this trait, so it can
/// run against a live session or a canned set of pages.
pub trait PageSource: Send + Sync {
    /// Fetches one page (0-based) of the user's solved-problem listing
    fn fetch_catalog_page(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<String, HistorianError>> + Send;

    /// Fetches one page (0-based, newest first) of the user's submissions to a problem on a mirror
    fn fetch_submission_page(
        &self,
        mirror: &Mirror,
        problem_id: &str,
        page: u32,
    ) -> impl Future<Output = Result<String, HistorianError>> + Send;
}

/// Login credentials
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A logged-in Kattis session
///
/// The session cookie lives in the client's cookie store, so every request
/// made through this value is authenticated.
pub struct KattisSession {
    client: Client,
    handle: String,
    problems_url: String,
    retry: RetryPolicy,
}

impl KattisSession {
    /// Logs in and returns a session bound to the user's handle
    ///
    /// # Arguments
    ///
    /// * `config` - Site and fetch configuration
    /// * `credentials` - Username (or email) and password
    ///
    /// # Returns
    ///
    /// * `Ok(KattisSession)` - Logged in successfully
    /// * `Err(HistorianError::Authentication)` - Credentials were rejected
    /// * `Err(HistorianError)` - The login page could not be fetched or read
    pub async fn login(config: &Config, credentials: &Credentials) -> Result<Self, HistorianError> {
        let client = build_http_client(&config.site, &config.fetch)?;
        let retry = RetryPolicy::from_config(&config.fetch);

        let handle = login(&client, &config.site.login_url, credentials, &retry).await?;
        tracing::info!("Logged in as {}", handle);

        Ok(Self {
            client,
            handle,
            problems_url: config.site.problems_url.clone(),
            retry,
        })
    }

    /// The user's Kattis handle
    pub fn handle(&self) -> &str {
        &self.handle
    }
}

impl PageSource for KattisSession {
    async fn fetch_catalog_page(&self, page: u32) -> Result<String, HistorianError> {
        let query = [
            ("show_solved", "on".to_string()),
            ("show_tried", "off".to_string()),
            ("show_untried", "off".to_string()),
            ("page", page.to_string()),
        ];

        fetch_with_retry(&self.client, &self.problems_url, &query, &self.retry).await
    }

    async fn fetch_submission_page(
        &self,
        mirror: &Mirror,
        problem_id: &str,
        page: u32,
    ) -> Result<String, HistorianError> {
        let url = format!(
            "{}/users/{}/submissions/{}",
            mirror.base_url(),
            self.handle,
            problem_id
        );
        let query = [("page", page.to_string())];

        match fetch_with_retry(&self.client, &url, &query, &self.retry).await {
            // The problem is not hosted on this mirror
            Err(HistorianError::HttpStatus { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                tracing::debug!("No submission history for {} on {}", problem_id, mirror);
                Ok(String::new())
            }
            other => other,
        }
    }
}
