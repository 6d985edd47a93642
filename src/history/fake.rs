//! In-memory page source for unit tests

use crate::history::Mirror;
use crate::session::PageSource;
use crate::HistorianError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Serves canned HTML pages and records every request
#[derive(Default)]
pub struct FakeSource {
    catalog: Vec<String>,
    submissions: HashMap<(String, String), Vec<String>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a catalog page listing `(id, difficulty)` pairs
    pub fn catalog_page(mut self, entries: &[(&str, f64)]) -> Self {
        self.catalog.push(catalog_html(entries));
        self
    }

    /// Appends a catalog page with arbitrary HTML
    pub fn raw_catalog_page(mut self, html: String) -> Self {
        self.catalog.push(html);
        self
    }

    /// Sets the submission pages of a problem on a mirror; rows are `(timestamp, status)`
    pub fn submissions(mut self, mirror: &str, id: &str, pages: Vec<Vec<(String, String)>>) -> Self {
        let pages = pages.iter().map(|rows| submissions_html(rows)).collect();
        self.submissions
            .insert((Mirror::new(mirror).to_string(), id.to_string()), pages);
        self
    }

    /// Makes every submission fetch for `id` fail
    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PageSource for FakeSource {
    async fn fetch_catalog_page(&self, page: u32) -> Result<String, HistorianError> {
        self.record(format!("catalog:{}", page));
        Ok(self
            .catalog
            .get(page as usize)
            .cloned()
            .unwrap_or_else(|| catalog_html(&[])))
    }

    async fn fetch_submission_page(
        &self,
        mirror: &Mirror,
        problem_id: &str,
        page: u32,
    ) -> Result<String, HistorianError> {
        self.record(format!("{}:{}:{}", mirror, problem_id, page));

        if self.failing.contains(problem_id) {
            return Err(HistorianError::Fetch {
                url: format!("{}/submissions/{}", mirror, problem_id),
                attempts: 1,
                message: "Connection refused".to_string(),
            });
        }

        Ok(self
            .submissions
            .get(&(mirror.to_string(), problem_id.to_string()))
            .and_then(|pages| pages.get(page as usize))
            .cloned()
            .unwrap_or_else(|| submissions_html(&[])))
    }
}

pub fn catalog_html(entries: &[(&str, f64)]) -> String {
    let rows: String = entries
        .iter()
        .map(|(id, difficulty)| {
            format!(
                r#"<tr><td><a href="/problems/{id}">{id}</a></td><td></td><td></td><td></td><td></td><td></td><td></td><td></td><td>{difficulty:.1}</td></tr>"#
            )
        })
        .collect();
    format!("<table><tbody>{}</tbody></table>", rows)
}

pub fn submissions_html(rows: &[(String, String)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(timestamp, status)| {
            format!(
                r#"<tr><td>1</td><td>{timestamp}</td><td>p</td><td>{status}</td><td>C++</td></tr>"#
            )
        })
        .collect();
    format!("<table><tbody>{}</tbody></table>", rows)
}

/// A submission row
pub fn row(timestamp: &str, status: &str) -> (String, String) {
    (timestamp.to_string(), status.to_string())
}

/// `count` rejected submissions on one day
pub fn rejected_rows(count: usize, date: &str) -> Vec<(String, String)> {
    (0..count)
        .map(|_| row(&format!("{} 12:00:00", date), "Wrong Answer"))
        .collect()
}
