//! HTTP client construction

use crate::config::{FetchConfig, SiteConfig};
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with a cookie store for the login session
///
/// # Arguments
///
/// * `site` - Supplies the User-Agent header
/// * `fetch` - Supplies the request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use kattis_historian::config::Config;
/// use kattis_historian::session::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.site, &config.fetch).unwrap();
/// ```
pub fn build_http_client(site: &SiteConfig, fetch: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(site.user_agent.as_str())
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}
