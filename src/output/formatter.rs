use std::io::IsTerminal;

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use crate::grader::GradeReport;

/// Opens every block the grader appends to the student-visible output
pub const SECTION_BREAK: &str = "\n\n*****************************\n";

/// Render a timestamp in the display time zone
/// Format: "January 01 at 11:59 PM (UTC-0600)"
pub fn format_date(date: &DateTime<FixedOffset>, tz: Tz) -> String {
    date.with_timezone(&tz)
        .format("%B %d at %-I:%M %p (UTC%z)")
        .to_string()
}

/// Plural suffix for a count: "" for exactly 1, "s" otherwise
pub fn pluralize(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Render marks the way they appear in results: always with a fractional part
/// (80.0, 72.5)
pub fn format_marks(marks: f64) -> String {
    format!("{:?}", marks)
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// One-line summary of a grading run for the harness log
pub fn format_summary(report: &GradeReport, use_colors: bool) -> String {
    let score = format_marks(report.score);

    let status = if report.exceeded_limit {
        format!(
            "submission {} over the cap, previous score kept",
            report.submission_count
        )
    } else if report.days_late > 0 {
        format!(
            "{} day{} late",
            report.days_late,
            pluralize(report.days_late)
        )
    } else {
        "on time".to_string()
    };

    if use_colors {
        let status = if report.exceeded_limit {
            status.yellow().to_string()
        } else if report.days_late > 0 {
            status.red().to_string()
        } else {
            status.green().to_string()
        };
        format!("Final score: {} ({})", score.bold(), status)
    } else {
        format!("Final score: {} ({})", score, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> GradeReport {
        GradeReport {
            score: 70.0,
            submission_count: 2,
            exceeded_limit: false,
            days_late: 0,
            commits: 1,
        }
    }

    #[test]
    fn test_format_date_converts_to_display_zone() {
        let due = DateTime::parse_from_rfc3339("2024-01-02T05:59:00+00:00").unwrap();
        assert_eq!(
            format_date(&due, chrono_tz::America::Chicago),
            "January 01 at 11:59 PM (UTC-0600)"
        );
    }

    #[test]
    fn test_format_date_unpadded_hour_and_dst() {
        let date = DateTime::parse_from_rfc3339("2024-07-04T09:05:00-05:00").unwrap();
        assert_eq!(
            format_date(&date, chrono_tz::America::Chicago),
            "July 04 at 9:05 AM (UTC-0500)"
        );
    }

    #[test]
    fn test_format_date_other_zone() {
        let date = DateTime::parse_from_rfc3339("2024-03-10T12:30:00+00:00").unwrap();
        assert_eq!(
            format_date(&date, chrono_tz::UTC),
            "March 10 at 12:30 PM (UTC+0000)"
        );
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0), "s");
        assert_eq!(pluralize(1), "");
        assert_eq!(pluralize(2), "s");
    }

    #[test]
    fn test_format_marks() {
        assert_eq!(format_marks(80.0), "80.0");
        assert_eq!(format_marks(72.5), "72.5");
        assert_eq!(format_marks(0.0), "0.0");
    }

    #[test]
    fn test_summary_on_time() {
        assert_eq!(
            format_summary(&report(), false),
            "Final score: 70.0 (on time)"
        );
    }

    #[test]
    fn test_summary_late() {
        let mut r = report();
        r.days_late = 1;
        assert_eq!(format_summary(&r, false), "Final score: 70.0 (1 day late)");
        r.days_late = 3;
        assert_eq!(format_summary(&r, false), "Final score: 70.0 (3 days late)");
    }

    #[test]
    fn test_summary_cap_exceeded() {
        let mut r = report();
        r.exceeded_limit = true;
        r.submission_count = 4;
        assert_eq!(
            format_summary(&r, false),
            "Final score: 70.0 (submission 4 over the cap, previous score kept)"
        );
    }

    #[test]
    fn test_summary_colored_keeps_text() {
        let result = format_summary(&report(), true);
        assert!(result.contains("70.0"));
        assert!(result.contains("on time"));
    }
}
