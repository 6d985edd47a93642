//! History module - score reconstruction pipeline
//!
//! This module contains the core logic, including:
//! - Paginating the solved-problem catalog
//! - Resolving each problem's first accepted submission across mirrors
//! - Grouping first solves by day and rebuilding the cumulative score
//! - Coordinating the stages for a full run

mod catalog;
mod coordinator;
mod resolver;
mod timeline;
mod types;

#[cfg(test)]
mod fake;

pub use catalog::build_catalog;
pub use coordinator::{collect_history, run_history};
pub use resolver::{resolve, resolve_all, ResolveOptions};
pub use timeline::{calendar, reconstruct};
pub use types::{
    CalendarEntry, Catalog, CatalogEntry, CatalogPage, FailedResolution, HistoryReport, Mirror,
    ResolutionReport, ResolvedProblem, SubmissionPage, TimelinePoint, DEFAULT_BASELINE,
    SUBMISSION_PAGE_SIZE,
};
