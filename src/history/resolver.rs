//! Earliest-solve resolution
//!
//! Submission histories are listed newest first in pages of
//! [`SUBMISSION_PAGE_SIZE`] rows. For each mirror the pages are walked in
//! order until a short page shows the history is exhausted, and the earliest
//! accepted date seen on any mirror wins.

use crate::config::FetchConfig;
use crate::extract::extract_submission_page;
use crate::history::{
    CatalogEntry, FailedResolution, Mirror, ResolutionReport, ResolvedProblem,
    SUBMISSION_PAGE_SIZE,
};
use crate::session::PageSource;
use crate::HistorianError;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Knobs for resolving submission histories
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Pages walked per mirror before giving up on a runaway history
    pub max_pages: u32,

    /// Problems resolved at once
    pub max_concurrent: usize,

    /// Date assigned to submissions shown with a time only
    pub today: NaiveDate,
}

impl ResolveOptions {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            max_concurrent: config.max_concurrent_problems as usize,
            today: chrono::Local::now().date_naive(),
        }
    }
}

/// Finds the earliest accepted submission of one problem across all mirrors
///
/// # Arguments
///
/// * `source` - Where submission pages are read from
/// * `entry` - The catalog entry to resolve
/// * `mirrors` - Mirrors to search, in a fixed order
/// * `options` - Page limit and reference date
///
/// # Returns
///
/// * `Ok(ResolvedProblem)` - `first_solved` is the earliest date found, or `None`
/// * `Err(HistorianError)` - A page could not be fetched, or a history ran past `max_pages`
pub async fn resolve<S: PageSource>(
    source: &S,
    entry: CatalogEntry,
    mirrors: &[Mirror],
    options: &ResolveOptions,
) -> Result<ResolvedProblem, HistorianError> {
    let mut first_solved: Option<NaiveDate> = None;

    for mirror in mirrors {
        if let Some(date) = earliest_on_mirror(source, &entry.id, mirror, options).await? {
            first_solved = earlier(first_solved, date);
        }
    }

    if first_solved.is_none() {
        tracing::debug!("No accepted submission found for {}", entry.id);
    }

    Ok(ResolvedProblem {
        entry,
        first_solved,
    })
}

/// Walks one mirror's history of a problem and returns its earliest accepted date
async fn earliest_on_mirror<S: PageSource>(
    source: &S,
    problem_id: &str,
    mirror: &Mirror,
    options: &ResolveOptions,
) -> Result<Option<NaiveDate>, HistorianError> {
    let mut earliest = None;

    for page in 0..options.max_pages {
        let html = source.fetch_submission_page(mirror, problem_id, page).await?;
        let submissions = extract_submission_page(&html, options.today);

        if let Some(date) = submissions.accepted_date {
            earliest = earlier(earliest, date);
        }

        // Full pages hold exactly SUBMISSION_PAGE_SIZE rows
        if submissions.is_last() {
            return Ok(earliest);
        }
    }

    Err(HistorianError::PageLimit {
        what: format!(
            "submissions of {} on {} ({} rows per page)",
            problem_id, mirror, SUBMISSION_PAGE_SIZE
        ),
        limit: options.max_pages,
    })
}

fn earlier(current: Option<NaiveDate>, candidate: NaiveDate) -> Option<NaiveDate> {
    match current {
        Some(date) if date <= candidate => Some(date),
        _ => Some(candidate),
    }
}

/// Resolves every catalog entry, up to `options.max_concurrent` at a time
///
/// Within one problem, mirrors and pages are still fetched strictly in
/// order. A problem whose resolution fails is reported in
/// [`ResolutionReport::failed`] and the remaining problems carry on.
///
/// # Returns
///
/// * `Ok(ResolutionReport)` - Results in catalog order
/// * `Err(HistorianError::Task)` - A resolution task panicked
pub async fn resolve_all<S>(
    source: Arc<S>,
    catalog: Vec<CatalogEntry>,
    mirrors: &[Mirror],
    options: &ResolveOptions,
) -> Result<ResolutionReport, HistorianError>
where
    S: PageSource + 'static,
{
    let total = catalog.len();
    let semaphore = Arc::new(Semaphore::new(options.max_concurrent.max(1)));
    let mirrors: Arc<[Mirror]> = mirrors.into();
    let mut tasks = JoinSet::new();

    for (index, entry) in catalog.into_iter().enumerate() {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let mirrors = Arc::clone(&mirrors);
        let options = options.clone();

        tasks.spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => resolve(source.as_ref(), entry.clone(), &mirrors, &options).await,
                Err(e) => Err(HistorianError::Task(e.to_string())),
            };
            (index, entry, outcome)
        });
    }

    let mut outcomes: Vec<Option<(CatalogEntry, Result<ResolvedProblem, HistorianError>)>> =
        (0..total).map(|_| None).collect();
    let mut done = 0;

    while let Some(joined) = tasks.join_next().await {
        let (index, entry, outcome) = joined.map_err(|e| HistorianError::Task(e.to_string()))?;

        if let Err(e) = &outcome {
            tracing::warn!("Could not backdate {}: {}", entry.id, e);
        }

        outcomes[index] = Some((entry, outcome));
        done += 1;

        if done % 10 == 0 || done == total {
            tracing::info!("Backdated {}/{} problems", done, total);
        }
    }

    let mut report = ResolutionReport::default();
    for (entry, outcome) in outcomes.into_iter().flatten() {
        match outcome {
            Ok(resolved) => report.resolved.push(resolved),
            Err(e) => report.failed.push(FailedResolution {
                entry,
                error: e.to_string(),
            }),
        }
    }

    Ok(report)
}
