use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::model::Project;
use crate::timeline::interval::overlaps;

/// How many projects each assignee is on during one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLoad {
    /// 1 – 12.
    pub month: u32,
    /// Short month name, e.g. "Jan".
    pub label: String,
    pub counts: BTreeMap<String, u32>,
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// The year the resource chart shows: the first project with a readable start date.
pub fn default_load_year(projects: &[Project]) -> Option<i32> {
    projects.iter().find_map(|p| p.start().ok()).map(|d| d.year())
}

/// Per-month project counts for each assignee in `year`.
///
/// `selected` narrows the assignees reported; empty means all of them. A project
/// counts toward every month its `[start, end]` range touches.
pub fn monthly_load(projects: &[Project], year: i32, selected: &[String]) -> Vec<MonthLoad> {
    let shown: BTreeSet<String> = projects
        .iter()
        .flat_map(|p| p.assignees.iter())
        .filter(|a| selected.is_empty() || selected.contains(a))
        .cloned()
        .collect();

    let dated: Vec<(&Project, NaiveDate, NaiveDate)> = projects
        .iter()
        .filter_map(|p| match p.dates() {
            Ok((start, end)) => Some((p, start, end)),
            Err(e) => {
                log::warn!("Invalid date for project '{}': {}", p.name, e);
                None
            }
        })
        .collect();

    (1..=12)
        .filter_map(|month| {
            let (first, last) = month_bounds(year, month)?;
            let mut counts: BTreeMap<String, u32> =
                shown.iter().map(|a| (a.clone(), 0)).collect();
            for (project, start, end) in &dated {
                if !overlaps(*start, *end, first, last) {
                    continue;
                }
                for assignee in &project.assignees {
                    if let Some(count) = counts.get_mut(assignee) {
                        *count += 1;
                    }
                }
            }
            Some(MonthLoad {
                month,
                label: first.format("%b").to_string(),
                counts,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Board, ProjectDraft};

    #[test]
    fn counts_each_month_a_project_touches() {
        let board = Board::sample();
        let load = monthly_load(board.projects(), 2024, &[]);
        assert_eq!(load.len(), 12);
        assert_eq!(load[0].label, "Jan");

        // "Dev Team A" is on Core Features (Mar–Jun) and API Integration (Apr–May).
        let dev_a: Vec<u32> = load.iter().map(|m| m.counts["Dev Team A"]).collect();
        assert_eq!(dev_a, vec![0, 0, 1, 2, 2, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn selection_limits_reported_assignees() {
        let board = Board::sample();
        let load = monthly_load(board.projects(), 2024, &["Marketing Team".to_string()]);
        assert!(load.iter().all(|m| m.counts.len() == 1));
        assert_eq!(load[7].counts["Marketing Team"], 1);
        assert_eq!(load[9].counts["Marketing Team"], 0);
    }

    #[test]
    fn bad_dates_are_skipped() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut draft = ProjectDraft::new("Broken", "E", "T", d, d);
        draft.assignees = vec!["Ana".into()];
        let mut broken = Project::from_draft(draft);
        broken.end_date = "later".into();
        let load = monthly_load(&[broken], 2024, &[]);
        assert!(load.iter().all(|m| m.counts["Ana"] == 0));
    }

    #[test]
    fn default_year_comes_from_first_readable_start() {
        let board = Board::sample();
        assert_eq!(default_load_year(board.projects()), Some(2024));
        assert_eq!(default_load_year(&[]), None);
    }
}
