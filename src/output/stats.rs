//! Run summary
//!
//! This module condenses a [`HistoryReport`] into the numbers worth showing
//! at the end of a run, including which problems could not be backdated.

use crate::history::HistoryReport;
use crate::output::format_score;
use chrono::NaiveDate;

/// Summary of a reconstructed history
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// The user's Kattis handle
    pub handle: String,

    /// Problems listed as solved
    pub problems_solved: usize,

    /// Problems with a known first-solve date
    pub problems_backdated: usize,

    /// Problems with no accepted submission on any mirror
    pub unsolved: Vec<String>,

    /// Problems whose difficulty could not be read
    pub skipped: Vec<String>,

    /// Problems whose history could not be fetched
    pub failed: Vec<String>,

    /// Days with at least one first solve
    pub active_days: usize,

    pub first_day: Option<NaiveDate>,

    pub last_day: Option<NaiveDate>,

    /// Score after the last active day
    pub final_score: Option<f64>,
}

impl RunSummary {
    pub fn from_report(report: &HistoryReport) -> Self {
        Self {
            handle: report.handle.clone(),
            problems_solved: report.catalog_size,
            problems_backdated: report.resolution.solved_count(),
            unsolved: report
                .resolution
                .unsolved()
                .map(|p| p.entry.id.clone())
                .collect(),
            skipped: report.skipped.clone(),
            failed: report
                .resolution
                .failed
                .iter()
                .map(|f| f.entry.id.clone())
                .collect(),
            active_days: report.timeline.len(),
            first_day: report.timeline.first().map(|p| p.date),
            last_day: report.timeline.last().map(|p| p.date),
            final_score: report.timeline.last().map(|p| p.cumulative_score),
        }
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Score History for {} ===\n", summary.handle);

    println!("Overview:");
    println!("  Problems solved: {}", summary.problems_solved);
    println!("  Backdated to first AC: {}", summary.problems_backdated);
    println!("  Active days: {}", summary.active_days);

    if let (Some(first), Some(last)) = (summary.first_day, summary.last_day) {
        println!("  Period: {} to {}", first, last);
    }
    if let Some(score) = summary.final_score {
        println!("  Reconstructed score: {}", format_score(score));
    }
    println!();

    if !summary.unsolved.is_empty() {
        println!("No accepted submission found ({}):", summary.unsolved.len());
        for id in &summary.unsolved {
            println!("  - {}", id);
        }
        println!();
    }

    if !summary.skipped.is_empty() {
        println!("Difficulty unreadable ({}):", summary.skipped.len());
        for id in &summary.skipped {
            println!("  - {}", id);
        }
        println!();
    }

    if !summary.failed.is_empty() {
        println!("Could not be fetched ({}):", summary.failed.len());
        for id in &summary.failed {
            println!("  - {}", id);
        }
        println!();
    }
}
