//! Score timeline reconstruction
//!
//! Every problem is credited on the day it was first solved. The score after
//! each active day is the running sum of those credits on top of the
//! baseline, rounded to one decimal after every step the way Kattis displays
//! scores.

use crate::history::{CalendarEntry, ResolvedProblem, TimelinePoint};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Sums the difficulty of first solves per day, oldest day first
///
/// Problems without a first-solve date are skipped.
pub fn calendar(problems: &[ResolvedProblem]) -> Vec<CalendarEntry> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for problem in problems {
        if let Some(date) = problem.first_solved {
            *days.entry(date).or_insert(0.0) += problem.entry.difficulty;
        }
    }

    days.into_iter()
        .map(|(date, points_earned)| CalendarEntry {
            date,
            points_earned,
        })
        .collect()
}

/// Rebuilds the cumulative score after every day with a first solve
///
/// Returns an empty timeline when no problem has a first-solve date, rather
/// than a lone baseline point.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use kattis_historian::history::{reconstruct, CatalogEntry, ResolvedProblem};
///
/// let solved = |id: &str, difficulty: f64, day: u32| ResolvedProblem {
///     entry: CatalogEntry { id: id.to_string(), difficulty },
///     first_solved: NaiveDate::from_ymd_opt(2024, 1, day),
/// };
///
/// let timeline = reconstruct(&[solved("a", 1.0, 1), solved("b", 5.0, 4), solved("c", 3.2, 7)], 1.0);
/// let scores: Vec<f64> = timeline.iter().map(|p| p.cumulative_score).collect();
/// assert_eq!(scores, vec![2.0, 7.0, 10.2]);
/// ```
pub fn reconstruct(problems: &[ResolvedProblem], baseline: f64) -> Vec<TimelinePoint> {
    let mut cumulative_score = baseline;

    calendar(problems)
        .into_iter()
        .map(|day| {
            cumulative_score = round_to_tenth(cumulative_score + day.points_earned);
            TimelinePoint {
                date: day.date,
                cumulative_score,
            }
        })
        .collect()
}

fn round_to_tenth(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
