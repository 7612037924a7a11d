use chrono::{Datelike, Duration, NaiveDate};

use super::interval::{day_offset, year_start};
use super::viewport::YearViewport;
use crate::error::DateParseError;
use crate::model::Project;

/// A completed horizontal drag of a project bar, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Pointer distance from the bar's left edge, captured at drag start.
    pub grab_offset_x: f64,
    /// Pointer position at drop, relative to the viewport's left edge.
    pub drop_x: f64,
}

impl DragGesture {
    pub fn new(grab_offset_x: f64, drop_x: f64) -> Self {
        Self {
            grab_offset_x,
            drop_x,
        }
    }

    /// Day of the display year the bar's left edge was dropped on, or `None`
    /// when the pointer position is not a usable number.
    pub fn target_day(&self, viewport: &YearViewport) -> Option<i64> {
        let x = self.drop_x - self.grab_offset_x;
        x.is_finite().then(|| viewport.x_to_day(x))
    }
}

/// New `(start, end)` for a dragged project.
///
/// The shift is measured from the project's start as a day of its own calendar
/// year and applied to both ends, so the duration never changes.
pub fn resolve_dates(
    project: &Project,
    gesture: &DragGesture,
    viewport: &YearViewport,
) -> Result<(NaiveDate, NaiveDate), DateParseError> {
    let (start, end) = project.dates()?;
    let original_day = day_offset(start, year_start(start.year()));
    let day_delta = gesture
        .target_day(viewport)
        .and_then(|day| day.checked_sub(original_day))
        .ok_or_else(|| DateParseError::new(&project.start_date))?;

    let shift = Duration::try_days(day_delta).ok_or_else(|| DateParseError::new(&project.start_date))?;
    let new_start = start
        .checked_add_signed(shift)
        .ok_or_else(|| DateParseError::new(&project.start_date))?;
    let new_end = new_start
        .checked_add_signed(end - start)
        .ok_or_else(|| DateParseError::new(&project.end_date))?;
    Ok((new_start, new_end))
}

/// Apply a drag to one project. Dates that cannot be resolved leave it unchanged.
pub fn reschedule(project: &Project, gesture: &DragGesture, viewport: &YearViewport) -> Project {
    match resolve_dates(project, gesture, viewport) {
        Ok((start, end)) => {
            log::info!(
                "Rescheduled '{}' from {}..{} to {}..{}",
                project.name,
                project.start_date,
                project.end_date,
                start,
                end
            );
            project.with_dates(start, end)
        }
        Err(e) => {
            log::warn!("Ignoring move of '{}': {}", project.name, e);
            project.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectDraft;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(start: NaiveDate, end: NaiveDate) -> Project {
        Project::from_draft(ProjectDraft::new("Move me", "EPIC-9", "Ops", start, end))
    }

    #[test]
    fn five_day_drag_shifts_both_ends() {
        // One pixel per day.
        let viewport = YearViewport::new(2024, 366.0).unwrap();
        let p = project(date(2024, 3, 1), date(2024, 3, 10));
        // Bar starts at day 60; grabbed 10px in, dropped so the edge lands on day 65.
        let moved = reschedule(&p, &DragGesture::new(10.0, 75.0), &viewport);
        assert_eq!(moved.start_date, "2024-03-06");
        assert_eq!(moved.end_date, "2024-03-15");
        assert_eq!(moved.id, p.id);
    }

    #[test]
    fn backwards_drag_keeps_duration() {
        let viewport = YearViewport::new(2023, 730.0).unwrap();
        let p = project(date(2023, 7, 1), date(2023, 9, 30));
        let moved = reschedule(&p, &DragGesture::new(0.0, 0.0), &viewport);
        assert_eq!(moved.start_date, "2023-01-01");
        assert_eq!(
            moved.end().unwrap() - moved.start().unwrap(),
            p.end().unwrap() - p.start().unwrap()
        );
    }

    #[test]
    fn offset_is_taken_from_the_projects_own_year() {
        // Started mid-December 2023 but displayed in 2024.
        let viewport = YearViewport::new(2024, 366.0).unwrap();
        let p = project(date(2023, 12, 15), date(2024, 1, 20));
        let (start, end) = resolve_dates(&p, &DragGesture::new(0.0, 348.0), &viewport).unwrap();
        assert_eq!(start, date(2023, 12, 15));
        assert_eq!(end, date(2024, 1, 20));
    }

    #[test]
    fn extreme_drop_positions_leave_project_unchanged() {
        let viewport = YearViewport::new(2024, 366.0).unwrap();
        let p = project(date(2024, 3, 1), date(2024, 3, 10));
        for drop_x in [-1e300, 1e300, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let moved = reschedule(&p, &DragGesture::new(0.0, drop_x), &viewport);
            assert_eq!(moved, p, "drop_x = {drop_x}");
        }
        let moved = reschedule(&p, &DragGesture::new(f64::INFINITY, 10.0), &viewport);
        assert_eq!(moved, p);
    }

    #[test]
    fn unparsable_dates_leave_project_unchanged() {
        let viewport = YearViewport::new(2024, 800.0).unwrap();
        let mut p = project(date(2024, 3, 1), date(2024, 3, 10));
        p.start_date = "03/01/2024?".to_string();
        let moved = reschedule(&p, &DragGesture::new(5.0, 400.0), &viewport);
        assert_eq!(moved, p);
    }
}
