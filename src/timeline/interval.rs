//! Calendar arithmetic for a single display year.
//!
//! Offsets are whole days from Jan 1 of the display year. Rendered spans use an
//! exclusive end, so a project running Jan 1..=Jan 1 occupies `[0, 1)`.

use chrono::{Datelike, NaiveDate};

use crate::error::DateParseError;
use crate::model::Project;

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| DateParseError::new(s))
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// 365 or 366.
pub fn days_in_year(year: i32) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Jan 1 of `year`. Years chrono cannot represent fall back to its minimum date.
pub fn year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Whole calendar days from `year_start` to `date`. Negative before the year,
/// `>= days_in_year` after it.
pub fn day_offset(date: NaiveDate, year_start: NaiveDate) -> i64 {
    (date - year_start).num_days()
}

/// Clamp `[start, end)` into `[0, total_days]`. `None` when nothing is left.
pub fn clamp_to_year(start: i64, end_exclusive: i64, total_days: i64) -> Option<(i64, i64)> {
    let clamped_start = start.max(0);
    let clamped_end = end_exclusive.min(total_days);
    if clamped_end - clamped_start <= 0 {
        None
    } else {
        Some((clamped_start, clamped_end))
    }
}

pub fn to_fraction(offset: i64, total_days: i64) -> f64 {
    if total_days <= 0 {
        return 0.0;
    }
    offset as f64 / total_days as f64
}

/// Inclusive overlap of two date ranges.
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// The portion of a project visible in a display year, as day offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub start: i64,
    pub end: i64,
    pub total_days: i64,
}

impl DaySpan {
    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    pub fn left_fraction(&self) -> f64 {
        to_fraction(self.start, self.total_days)
    }

    pub fn width_fraction(&self) -> f64 {
        to_fraction(self.len(), self.total_days)
    }
}

/// Whether the project's start..end years include `year`. Degenerate projects
/// (`end < start`) are never visible.
pub fn spans_year(start: NaiveDate, end: NaiveDate, year: i32) -> bool {
    end >= start && start.year() <= year && year <= end.year()
}

/// The clamped rendered interval of a project in `year`, or `None` when it is
/// outside the year or degenerate.
pub fn visible_span(project: &Project, year: i32) -> Result<Option<DaySpan>, DateParseError> {
    let (start, end) = project.dates()?;
    if !spans_year(start, end, year) {
        return Ok(None);
    }

    let origin = year_start(year);
    let total_days = days_in_year(year);
    let start_day = day_offset(start, origin);
    let duration = (end - start).num_days() + 1;

    Ok(clamp_to_year(start_day, start_day + duration, total_days).map(|(start, end)| DaySpan {
        start,
        end,
        total_days,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectDraft;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(start: &str, end: &str) -> Project {
        let mut p = Project::from_draft(ProjectDraft::new("P", "E-1", "Team", date(2024, 1, 1), date(2024, 1, 1)));
        p.start_date = start.to_string();
        p.end_date = end.to_string();
        p
    }

    #[test]
    fn leap_years_follow_gregorian_rule() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2000), 366);
    }

    #[test]
    fn day_offset_counts_whole_days() {
        let origin = year_start(2024);
        assert_eq!(day_offset(date(2024, 1, 1), origin), 0);
        assert_eq!(day_offset(date(2024, 3, 1), origin), 60);
        assert_eq!(day_offset(date(2023, 12, 31), origin), -1);
        assert_eq!(day_offset(date(2025, 1, 1), origin), 366);
    }

    #[test]
    fn clamp_rejects_empty_and_negative_widths() {
        assert_eq!(clamp_to_year(-10, 5, 365), Some((0, 5)));
        assert_eq!(clamp_to_year(360, 400, 365), Some((360, 365)));
        assert_eq!(clamp_to_year(-10, 0, 365), None);
        assert_eq!(clamp_to_year(365, 370, 365), None);
        assert_eq!(clamp_to_year(10, 4, 365), None);
    }

    #[test]
    fn to_fraction_is_relative_to_year_length() {
        assert_eq!(to_fraction(0, 366), 0.0);
        assert_eq!(to_fraction(183, 366), 0.5);
        assert_eq!(to_fraction(366, 366), 1.0);
    }

    #[test]
    fn parse_date_reports_bad_values() {
        assert_eq!(parse_date(" 2024-02-29 "), Ok(date(2024, 2, 29)));
        assert_eq!(parse_date("2023-02-29"), Err(DateParseError::new("2023-02-29")));
        assert!(parse_date("soon").is_err());
    }

    #[test]
    fn span_across_years_is_clamped() {
        let span = visible_span(&project("2023-06-01", "2025-03-01"), 2024).unwrap().unwrap();
        assert_eq!((span.start, span.end, span.total_days), (0, 366, 366));
        assert_eq!(span.width_fraction(), 1.0);
    }

    #[test]
    fn span_uses_inclusive_end_date() {
        let span = visible_span(&project("2024-01-01", "2024-01-10"), 2024).unwrap().unwrap();
        assert_eq!((span.start, span.end), (0, 10));
    }

    #[test]
    fn previous_year_project_is_not_visible() {
        assert_eq!(visible_span(&project("2023-01-01", "2023-12-31"), 2024).unwrap(), None);
    }

    #[test]
    fn degenerate_project_is_not_visible() {
        assert_eq!(visible_span(&project("2024-05-10", "2024-05-01"), 2024).unwrap(), None);
    }

    #[test]
    fn malformed_date_is_an_error() {
        assert!(visible_span(&project("2024-13-01", "2024-12-01"), 2024).is_err());
    }
}
