//! Configuration module for Kattis-Historian
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file targets open.kattis.com
//! and nus.kattis.com.
//!
//! # Example
//!
//! ```no_run
//! use kattis_historian::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("historian.toml")).unwrap();
//! println!("Scanning {} mirrors", config.site.mirrors.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, OutputConfig, ScoringConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
