//! Solved-problem catalog
//!
//! The listing has no total-page count, so pages are read until one comes
//! back without any rows at all. Rows that cannot be read do not end the
//! listing.

use crate::extract::extract_solved_problems;
use crate::history::Catalog;
use crate::session::PageSource;
use crate::HistorianError;

/// Collects every solved problem from the paginated listing
///
/// # Arguments
///
/// * `source` - Where listing pages are read from
/// * `max_pages` - Listing pages read before giving up on a runaway listing
///
/// # Returns
///
/// * `Ok(Catalog)` - All listed problems in listing order (possibly empty),
///   plus those whose difficulty could not be read
/// * `Err(HistorianError::PageLimit)` - `max_pages` pages all had rows
/// * `Err(HistorianError)` - A page could not be fetched
pub async fn build_catalog<S: PageSource>(
    source: &S,
    max_pages: u32,
) -> Result<Catalog, HistorianError> {
    let mut catalog = Catalog::default();

    for page in 0..max_pages {
        let html = source.fetch_catalog_page(page).await?;
        let listing = extract_solved_problems(&html);

        if listing.is_last() {
            tracing::debug!("Catalog page {} is empty, listing complete", page);
            return Ok(catalog);
        }

        for id in &listing.skipped {
            tracing::warn!("Skipping {}: difficulty could not be read", id);
        }

        tracing::debug!(
            "Catalog page {} listed {} problems ({} rows)",
            page,
            listing.entries.len(),
            listing.row_count
        );
        catalog.entries.extend(listing.entries);
        catalog.skipped.extend(listing.skipped);
    }

    Err(HistorianError::PageLimit {
        what: "solved-problem listing".to_string(),
        limit: max_pages,
    })
}
