//! HTML extraction for Kattis pages
//!
//! Every function here treats a missing element as "not found" and returns
//! `None` or an empty result. Deciding whether absence is fatal is left to
//! the caller.

use crate::history::{CatalogEntry, CatalogPage, SubmissionPage};
use chrono::{NaiveDate, NaiveTime};
use scraper::{ElementRef, Html, Selector};

/// Column holding the problem link in the solved-problems table
const PROBLEM_LINK_COLUMN: usize = 0;

/// Column holding the difficulty (a single value or a range)
const DIFFICULTY_COLUMN: usize = 8;

/// Column holding the submission timestamp
const SUBMISSION_DATE_COLUMN: usize = 1;

/// Column holding the judgement ("Accepted", "Wrong Answer", ...)
const SUBMISSION_STATUS_COLUMN: usize = 3;

/// Extracts the CSRF token from the login form
///
/// # Example
///
/// ```
/// use kattis_historian::extract::extract_csrf_token;
///
/// let html = r#"<form><input type="hidden" name="csrf_token" value="1234"></form>"#;
/// assert_eq!(extract_csrf_token(html), Some("1234".to_string()));
/// ```
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"input[name="csrf_token"]"#).ok()?;

    document
        .select(&selector)
        .filter_map(|input| input.value().attr("value"))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Extracts the user's handle from the profile infobox shown after login
pub fn extract_handle(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(".user-infobox-name a[href]").ok()?;

    document
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| href.strip_prefix("/users/"))
        .map(|handle| handle.trim_end_matches('/').to_string())
        .find(|handle| !handle.is_empty())
}

/// Extracts the solved problems listed on one page of the problem listing
///
/// Rows without a problem link are ignored. Problems whose difficulty cannot
/// be read are reported in [`CatalogPage::skipped`]. Every row counts toward
/// [`CatalogPage::row_count`], so a page of unreadable rows does not look
/// like the end of the listing. An absent table yields zero rows.
pub fn extract_solved_problems(html: &str) -> CatalogPage {
    let document = Html::parse_document(html);
    let rows = table_rows(&document);
    let mut page = CatalogPage {
        row_count: rows.len(),
        ..CatalogPage::default()
    };

    for row in &rows {
        let cells = row_cells(row);
        let Some(id) = cells.get(PROBLEM_LINK_COLUMN).and_then(problem_id) else {
            tracing::debug!("Ignoring problem row without a problem link");
            continue;
        };

        match cells
            .get(DIFFICULTY_COLUMN)
            .and_then(|cell| parse_difficulty(&cell_text(cell)))
        {
            Some(difficulty) => page.entries.push(CatalogEntry { id, difficulty }),
            None => page.skipped.push(id),
        }
    }

    page
}

/// Extracts the earliest accepted date and the row count of a submissions page
///
/// Rows are listed newest first, so the table is scanned from the bottom.
/// `today` stands in for submissions whose date cell only shows a time.
pub fn extract_submission_page(html: &str, today: NaiveDate) -> SubmissionPage {
    let document = Html::parse_document(html);
    let rows = table_rows(&document);

    let accepted_date = rows.iter().rev().find_map(|row| {
        let cells = row_cells(row);
        if cells.len() <= SUBMISSION_STATUS_COLUMN {
            return None;
        }

        if !is_accepted(&cell_text(&cells[SUBMISSION_STATUS_COLUMN])) {
            return None;
        }

        parse_submission_date(&cell_text(&cells[SUBMISSION_DATE_COLUMN]), today)
    });

    SubmissionPage {
        accepted_date,
        row_count: rows.len(),
    }
}

/// Parses a difficulty cell, taking the upper bound of a range
///
/// # Example
///
/// ```
/// use kattis_historian::extract::parse_difficulty;
///
/// assert_eq!(parse_difficulty("1.7 - 3.4"), Some(3.4));
/// assert_eq!(parse_difficulty(" 2.0 "), Some(2.0));
/// assert_eq!(parse_difficulty("n/a"), None);
/// assert_eq!(parse_difficulty("-1.0"), None);
/// ```
pub fn parse_difficulty(text: &str) -> Option<f64> {
    let text = text.trim();
    // A leading minus is a sign, not a range separator
    if text.starts_with('-') {
        return None;
    }

    let upper = text.rsplit('-').next()?.trim();

    upper
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}

/// Returns true for an accepted judgement, including subtask suffixes like "Accepted (100)"
pub fn is_accepted(status: &str) -> bool {
    status.trim().starts_with("Accepted")
}

/// Parses the calendar date of a submission timestamp cell
///
/// Kattis shows `YYYY-MM-DD HH:MM:SS`, or only `HH:MM:SS` for submissions
/// made today.
pub fn parse_submission_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let token = text.split_whitespace().next()?;

    NaiveDate::parse_from_str(token, "%Y-%m-%d").ok().or_else(|| {
        NaiveTime::parse_from_str(token, "%H:%M:%S")
            .ok()
            .map(|_| today)
    })
}

/// Rows of the first table body in the document
fn table_rows(document: &Html) -> Vec<ElementRef<'_>> {
    let (Ok(tbody), Ok(tr)) = (Selector::parse("tbody"), Selector::parse("tr")) else {
        return Vec::new();
    };

    document
        .select(&tbody)
        .next()
        .map(|body| body.select(&tr).collect())
        .unwrap_or_default()
}

fn row_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    match Selector::parse("td") {
        Ok(td) => row.select(&td).collect(),
        Err(_) => Vec::new(),
    }
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Problem id from a link such as `/problems/hello`
fn problem_id(cell: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse("a[href]").ok()?;
    let href = cell.select(&selector).next()?.value().attr("href")?;

    let path = href.split(['?', '#']).next()?;
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    segments
        .find(|s| *s == "problems")
        .and_then(|_| segments.next())
        .map(str::to_string)
}
