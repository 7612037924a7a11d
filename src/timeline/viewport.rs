use chrono::NaiveDate;

use super::interval::{day_offset, days_in_year, visible_span, year_start, DaySpan};
use crate::error::{ConfigError, DateParseError};
use crate::model::Project;

/// Horizontal geometry of a project bar in a year viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub span: DaySpan,
    /// Left edge as a fraction of the viewport (0.0 – 1.0).
    pub left: f64,
    /// Width as a fraction of the viewport (0.0 – 1.0).
    pub width: f64,
    pub left_px: f64,
    pub width_px: f64,
}

/// One display year rendered across a fixed pixel width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearViewport {
    year: i32,
    width_px: f64,
}

impl YearViewport {
    pub fn new(year: i32, width_px: f64) -> Result<Self, ConfigError> {
        if !(width_px.is_finite() && width_px > 0.0) {
            return Err(ConfigError::InvalidWidth(width_px));
        }
        Ok(Self { year, width_px })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    pub fn total_days(&self) -> i64 {
        days_in_year(self.year)
    }

    pub fn pixels_per_day(&self) -> f64 {
        self.width_px / self.total_days() as f64
    }

    /// Convert a day offset to an x-pixel offset from the viewport's left edge.
    pub fn day_to_x(&self, day: i64) -> f64 {
        day as f64 * self.pixels_per_day()
    }

    /// Convert an x-pixel offset back to a whole day of the year.
    pub fn x_to_day(&self, x: f64) -> i64 {
        (x / self.width_px * self.total_days() as f64).round() as i64
    }

    pub fn date_to_x(&self, date: NaiveDate) -> f64 {
        self.day_to_x(day_offset(date, year_start(self.year)))
    }

    /// Where to draw a project, or `None` if it has nothing to show this year.
    pub fn bar(&self, project: &Project) -> Result<Option<BarGeometry>, DateParseError> {
        Ok(visible_span(project, self.year)?.map(|span| BarGeometry {
            span,
            left: span.left_fraction(),
            width: span.width_fraction(),
            left_px: self.day_to_x(span.start),
            width_px: self.day_to_x(span.len()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectDraft;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_non_positive_width() {
        assert!(YearViewport::new(2024, 0.0).is_err());
        assert!(YearViewport::new(2024, -5.0).is_err());
        assert!(YearViewport::new(2024, f64::NAN).is_err());
    }

    #[test]
    fn x_and_day_round_trip_on_whole_days() {
        let viewport = YearViewport::new(2023, 730.0).unwrap();
        assert_eq!(viewport.pixels_per_day(), 2.0);
        assert_eq!(viewport.day_to_x(10), 20.0);
        assert_eq!(viewport.x_to_day(22.4), 11);
        assert_eq!(viewport.date_to_x(date(2023, 1, 11)), 20.0);
    }

    #[test]
    fn bar_geometry_matches_span() {
        let viewport = YearViewport::new(2024, 366.0).unwrap();
        let project = Project::from_draft(ProjectDraft::new("A", "E", "T", date(2024, 3, 1), date(2024, 3, 10)));
        let bar = viewport.bar(&project).unwrap().unwrap();
        assert_eq!(bar.left_px, 60.0);
        assert_eq!(bar.width_px, 10.0);
        assert_eq!(bar.span.start, 60);
    }

    #[test]
    fn no_bar_outside_year() {
        let viewport = YearViewport::new(2025, 1000.0).unwrap();
        let project = Project::from_draft(ProjectDraft::new("A", "E", "T", date(2024, 3, 1), date(2024, 3, 10)));
        assert_eq!(viewport.bar(&project).unwrap(), None);
    }
}
