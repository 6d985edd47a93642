//! Kattis-Historian: reconstructs a Kattis score history
//!
//! This crate logs into Kattis on a user's behalf, discovers every solved problem,
//! backdates each one to its first accepted submission across the configured
//! mirrors, and rebuilds the user's cumulative score over time.

pub mod config;
pub mod extract;
pub mod history;
pub mod output;
pub mod session;

use thiserror::Error;

/// Main error type for Kattis-Historian operations
#[derive(Debug, Error)]
pub enum HistorianError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Login failed: {0}")]
    Authentication(String),

    #[error("No CSRF token found on login page {url}")]
    MissingLoginToken { url: String },

    #[error("Failed to fetch {url} after {attempts} attempt(s): {message}")]
    Fetch {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Gave up on {what} after {limit} pages")]
    PageLimit { what: String, limit: u32 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Resolution task failed: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Kattis-Historian operations
pub type Result<T> = std::result::Result<T, HistorianError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use history::{
    build_catalog, reconstruct, resolve, resolve_all, run_history, CatalogEntry, HistoryReport,
    Mirror, ResolvedProblem, TimelinePoint,
};
pub use session::{Credentials, KattisSession, PageSource};
