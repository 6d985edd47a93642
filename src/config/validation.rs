use crate::config::types::{Config, FetchConfig, OutputConfig, ScoringConfig, SiteConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetch_config(&config.fetch)?;
    validate_scoring_config(&config.scoring)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates login/listing URLs and the mirror list
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("login-url", &config.login_url)?;
    validate_http_url("problems-url", &config.problems_url)?;

    if config.mirrors.is_empty() {
        return Err(ConfigError::Validation(
            "at least one mirror is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for mirror in &config.mirrors {
        validate_http_url("mirror", mirror)?;

        if !seen.insert(mirror.trim_end_matches('/')) {
            return Err(ConfigError::Validation(format!(
                "mirror '{}' is listed more than once",
                mirror
            )));
        }
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.max_concurrent_problems < 1 || config.max_concurrent_problems > 32 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-problems must be between 1 and 32, got {}",
            config.max_concurrent_problems
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    if !config.baseline.is_finite() || config.baseline < 0.0 {
        return Err(ConfigError::Validation(format!(
            "baseline must be a non-negative number, got {}",
            config.baseline
        )));
    }
    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.csv_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "csv-path cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Checks that a URL parses and uses an HTTP(S) scheme
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}
