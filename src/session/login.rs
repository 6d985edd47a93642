//! Email/password login against the Kattis login form

use crate::extract::{extract_csrf_token, extract_handle};
use crate::session::fetcher::{fetch_with_retry, RetryPolicy};
use crate::session::Credentials;
use crate::HistorianError;
use reqwest::Client;

/// Text Kattis shows on the login page when the credentials are rejected
pub const LOGIN_FAILURE_MARKER: &str = "Unknown Username/Password";

/// Logs in and returns the user's handle
///
/// # Login Flow
///
/// 1. GET the login page and read the CSRF token from its form
/// 2. POST the form with the token and credentials
/// 3. Check the response for the rejection marker
/// 4. Read the handle from the profile infobox of the response
///
/// The session cookie set along the way stays in the client's cookie store.
///
/// # Returns
///
/// * `Ok(String)` - The user's handle
/// * `Err(HistorianError::MissingLoginToken)` - The login form had no CSRF token
/// * `Err(HistorianError::Authentication)` - Credentials rejected, or no handle after login
pub async fn login(
    client: &Client,
    login_url: &str,
    credentials: &Credentials,
    retry: &RetryPolicy,
) -> Result<String, HistorianError> {
    let login_page = fetch_with_retry(client, login_url, &[], retry).await?;

    let csrf_token =
        extract_csrf_token(&login_page).ok_or_else(|| HistorianError::MissingLoginToken {
            url: login_url.to_string(),
        })?;

    let form = [
        ("csrf_token", csrf_token.as_str()),
        ("user", credentials.username.as_str()),
        ("password", credentials.password.as_str()),
        ("submit", "Submit"),
    ];

    // Not retried: a login POST is not idempotent
    let response = client
        .post(login_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| HistorianError::Fetch {
            url: login_url.to_string(),
            attempts: 1,
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HistorianError::HttpStatus {
            url: login_url.to_string(),
            status: status.as_u16(),
        });
    }

    let html = response.text().await?;

    if html.contains(LOGIN_FAILURE_MARKER) {
        return Err(HistorianError::Authentication(
            LOGIN_FAILURE_MARKER.to_string(),
        ));
    }

    extract_handle(&html).ok_or_else(|| {
        HistorianError::Authentication("no user handle on the page after login".to_string())
    })
}
