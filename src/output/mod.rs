//! Output module for exporting score histories
//!
//! This module handles:
//! - Writing the timeline as a `Date,Cumulative Score` CSV table
//! - Summarizing a run for the terminal

mod csv_output;
pub mod stats;

pub use csv_output::{format_score, write_timeline, write_timeline_csv, CSV_HEADER};
pub use stats::{print_summary, RunSummary};

use std::path::PathBuf;

/// Resolves where the CSV goes: the configured path, or `<handle>.csv`
pub fn csv_path_for(configured: Option<&str>, handle: &str) -> PathBuf {
    match configured {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!("{}.csv", handle)),
    }
}
