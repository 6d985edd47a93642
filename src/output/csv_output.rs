//! CSV export of the score timeline

use crate::history::TimelinePoint;
use crate::HistorianError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row of the exported table
pub const CSV_HEADER: [&str; 2] = ["Date", "Cumulative Score"];

/// Writes the timeline as CSV to a file
///
/// # Arguments
///
/// * `path` - Destination file, created or truncated
/// * `timeline` - Points in chronological order
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(HistorianError)` - The file could not be created or written
pub fn write_timeline_csv(path: &Path, timeline: &[TimelinePoint]) -> Result<(), HistorianError> {
    let file = File::create(path)?;
    write_timeline(file, timeline)
}

/// Writes the timeline as CSV to any writer
///
/// Dates are ISO-8601 (`YYYY-MM-DD`) and scores carry one decimal.
pub fn write_timeline<W: Write>(writer: W, timeline: &[TimelinePoint]) -> Result<(), HistorianError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    for point in timeline {
        writer.write_record([
            point.date.format("%Y-%m-%d").to_string(),
            format_score(point.cumulative_score),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Formats a score with exactly one decimal
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(y: i32, m: u32, d: u32, score: f64) -> TimelinePoint {
        TimelinePoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            cumulative_score: score,
        }
    }

    #[test]
    fn test_write_timeline() {
        let timeline = vec![point(2020, 1, 1, 2.0), point(2020, 1, 4, 7.0), point(2020, 1, 7, 10.2)];
        let mut buffer = Vec::new();

        write_timeline(&mut buffer, &timeline).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(
            csv,
            "Date,Cumulative Score\n2020-01-01,2.0\n2020-01-04,7.0\n2020-01-07,10.2\n"
        );
    }

    #[test]
    fn test_write_empty_timeline_has_header_only() {
        let mut buffer = Vec::new();

        write_timeline(&mut buffer, &[]).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "Date,Cumulative Score\n");
    }

    #[test]
    fn test_write_timeline_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane.csv");

        write_timeline_csv(&path, &[point(2021, 12, 31, 1.5)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("2021-12-31,1.5\n"));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(2.0), "2.0");
        assert_eq!(format_score(10.2), "10.2");
        assert_eq!(format_score(123.45678), "123.5");
    }
}
