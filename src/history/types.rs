//! Records flowing through the history pipeline
//!
//! The pipeline is staged: the catalog yields immutable [`CatalogEntry`]
//! values, resolution wraps each one into a [`ResolvedProblem`], and the
//! reconstructor folds those into [`TimelinePoint`]s.

use chrono::NaiveDate;
use std::fmt;

/// Number of rows on a full page of submissions
pub const SUBMISSION_PAGE_SIZE: usize = 100;

/// Score every account starts with before solving anything
pub const DEFAULT_BASELINE: f64 = 1.0;

/// A solved problem as listed in the user's catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Problem identifier, e.g. `hello`
    pub id: String,

    /// Points awarded for the problem (upper bound of a displayed range)
    pub difficulty: f64,
}

/// What one page of the solved-problem listing tells us
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPage {
    /// Problems whose row could be read
    pub entries: Vec<CatalogEntry>,

    /// Ids of listed problems whose difficulty could not be read
    pub skipped: Vec<String>,

    /// Number of table rows on the page, readable or not
    pub row_count: usize,
}

impl CatalogPage {
    /// A page without any rows marks the end of the listing
    pub fn is_last(&self) -> bool {
        self.row_count == 0
    }
}

/// Every solved problem found in the listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Problems in listing order
    pub entries: Vec<CatalogEntry>,

    /// Listed problems left out because their difficulty could not be read
    pub skipped: Vec<String>,
}

impl Catalog {
    /// Number of problems listed as solved, including skipped ones
    pub fn listed(&self) -> usize {
        self.entries.len() + self.skipped.len()
    }
}

/// A catalog entry paired with its earliest accepted submission date
///
/// `first_solved` is `None` when no mirror shows an accepted submission. That
/// is a valid outcome, not an error: such problems are left out of scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProblem {
    pub entry: CatalogEntry,
    pub first_solved: Option<NaiveDate>,
}

impl ResolvedProblem {
    /// Returns true if an accepted submission was found on some mirror
    pub fn is_resolved(&self) -> bool {
        self.first_solved.is_some()
    }
}

/// One independently-hosted instance of the judge sharing the user's account
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mirror(String);

impl Mirror {
    /// Creates a mirror from its base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self(base_url.into().trim_end_matches('/').to_string())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What one page of a problem's submission history tells us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPage {
    /// Date of the oldest accepted submission on the page
    pub accepted_date: Option<NaiveDate>,

    /// Number of submission rows on the page
    pub row_count: usize,
}

impl SubmissionPage {
    /// A short page is the last page of the history
    pub fn is_last(&self) -> bool {
        self.row_count < SUBMISSION_PAGE_SIZE
    }
}

/// Points earned on a single day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub points_earned: f64,
}

/// Cumulative score at the end of a day with at least one first solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub cumulative_score: f64,
}

/// A problem whose submission history could not be fetched
#[derive(Debug, Clone)]
pub struct FailedResolution {
    pub entry: CatalogEntry,
    pub error: String,
}

/// Outcome of resolving a whole catalog, in catalog order
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    /// Every problem whose history was walked to the end, resolved or not
    pub resolved: Vec<ResolvedProblem>,

    /// Problems abandoned after fetch failures
    pub failed: Vec<FailedResolution>,
}

impl ResolutionReport {
    /// Problems with no accepted submission on any mirror
    pub fn unsolved(&self) -> impl Iterator<Item = &ResolvedProblem> {
        self.resolved.iter().filter(|p| !p.is_resolved())
    }

    /// Number of problems with a known first-solve date
    pub fn solved_count(&self) -> usize {
        self.resolved.iter().filter(|p| p.is_resolved()).count()
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct HistoryReport {
    /// The user's Kattis handle
    pub handle: String,

    /// Number of problems listed as solved
    pub catalog_size: usize,

    /// Listed problems with an unreadable difficulty, left out of scoring
    pub skipped: Vec<String>,

    pub resolution: ResolutionReport,

    pub timeline: Vec<TimelinePoint>,
}
