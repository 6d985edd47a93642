//! Page extraction for Kattis HTML
//!
//! This module turns raw page bodies into the primitive records the history
//! pipeline works with:
//! - The CSRF token of the login form
//! - The user's handle
//! - Solved problems and their difficulty
//! - The earliest accepted date on a page of submissions

mod parser;

pub use parser::{
    extract_csrf_token, extract_handle, extract_solved_problems, extract_submission_page,
    is_accepted, parse_difficulty, parse_submission_date,
};
