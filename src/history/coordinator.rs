//! History coordinator - main pipeline orchestration
//!
//! This module ties the stages together:
//! - Logging in (for a live run)
//! - Building the solved-problem catalog
//! - Backdating every problem to its first accepted submission
//! - Reconstructing the score timeline

use crate::config::Config;
use crate::history::catalog::build_catalog;
use crate::history::resolver::{resolve_all, ResolveOptions};
use crate::history::timeline::reconstruct;
use crate::history::{HistoryReport, Mirror};
use crate::session::{Credentials, KattisSession, PageSource};
use crate::HistorianError;
use std::sync::Arc;

/// Logs in and reconstructs the user's score history
///
/// Authentication failures abort before any scraping begins.
///
/// # Example
///
/// ```no_run
/// use kattis_historian::config::Config;
/// use kattis_historian::history::run_history;
/// use kattis_historian::session::Credentials;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("jane", "secret");
/// let report = run_history(&Config::default(), &credentials).await?;
/// println!("{} solved {} problems", report.handle, report.catalog_size);
/// # Ok(())
/// # }
/// ```
pub async fn run_history(
    config: &Config,
    credentials: &Credentials,
) -> Result<HistoryReport, HistorianError> {
    let session = KattisSession::login(config, credentials).await?;
    let handle = session.handle().to_string();

    collect_history(Arc::new(session), handle, config, ResolveOptions::from_config(&config.fetch))
        .await
}

/// Runs the catalog, resolution, and reconstruction stages against a page source
///
/// # Arguments
///
/// * `source` - An authenticated page source
/// * `handle` - The user's handle, carried into the report
/// * `config` - Mirrors, scoring baseline, and page limits
/// * `options` - Resolution knobs
pub async fn collect_history<S>(
    source: Arc<S>,
    handle: String,
    config: &Config,
    options: ResolveOptions,
) -> Result<HistoryReport, HistorianError>
where
    S: PageSource + 'static,
{
    tracing::info!("Profiling user {}", handle);
    let catalog = build_catalog(source.as_ref(), config.fetch.max_pages).await?;
    let catalog_size = catalog.listed();
    tracing::info!("Problems solved: {}", catalog_size);

    if !catalog.skipped.is_empty() {
        tracing::warn!(
            "{} problem(s) have no readable difficulty and are left out of the timeline",
            catalog.skipped.len()
        );
    }

    let mirrors: Vec<Mirror> = config.site.mirrors.iter().map(Mirror::new).collect();
    tracing::info!(
        "Backdating accepted submissions across {} mirror(s)",
        mirrors.len()
    );
    let resolution = resolve_all(source, catalog.entries, &mirrors, &options).await?;

    if !resolution.failed.is_empty() {
        tracing::warn!(
            "{} problem(s) could not be backdated and are left out of the timeline",
            resolution.failed.len()
        );
    }

    tracing::info!("Reconstructing score history");
    let timeline = reconstruct(&resolution.resolved, config.scoring.baseline);

    Ok(HistoryReport {
        handle,
        catalog_size,
        skipped: catalog.skipped,
        resolution,
        timeline,
    })
}
