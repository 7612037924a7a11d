//! Packs the projects visible in a display year into timeline rows.
//!
//! Projects are taken in start-date order and dropped into the first row whose
//! last end date is on or before their start. A project may therefore start on
//! the same day its row-mate ends. The heuristic is deliberately first-fit so the
//! same input always lands in the same rows.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::interval::spans_year;
use crate::model::{Project, ProjectId};

/// Row assignment for one display year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowLayout {
    rows: Vec<Vec<ProjectId>>,
    assignments: HashMap<ProjectId, usize>,
}

impl RowLayout {
    /// The 0-based row of a project, or `None` if it is not on this year's timeline.
    pub fn row_of(&self, id: ProjectId) -> Option<usize> {
        self.assignments.get(&id).copied()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Projects of each row, in placement order.
    pub fn rows(&self) -> &[Vec<ProjectId>] {
        &self.rows
    }

    pub fn assignments(&self) -> &HashMap<ProjectId, usize> {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

struct Lane {
    members: Vec<ProjectId>,
    last_end: NaiveDate,
}

/// Assign every project visible in `year` to a row.
///
/// Projects with unparsable dates, projects outside the year and projects ending
/// before they start are left out; a bad project never blanks the others.
pub fn pack_rows(projects: &[Project], year: i32) -> RowLayout {
    let mut visible: Vec<(ProjectId, NaiveDate, NaiveDate)> = projects
        .iter()
        .filter_map(|project| match project.dates() {
            Ok((start, end)) if spans_year(start, end, year) => Some((project.id, start, end)),
            Ok((start, end)) if end < start => {
                log::warn!(
                    "Project '{}' ends ({}) before it starts ({}); not shown",
                    project.name,
                    end,
                    start
                );
                None
            }
            Ok(_) => None,
            Err(e) => {
                log::warn!("Skipping project '{}' on the timeline: {}", project.name, e);
                None
            }
        })
        .collect();

    // Stable: equal start dates keep their input order.
    visible.sort_by_key(|&(_, start, _)| start);

    let mut lanes: Vec<Lane> = Vec::new();
    for (id, start, end) in visible {
        match lanes.iter_mut().find(|lane| lane.last_end <= start) {
            Some(lane) => {
                lane.members.push(id);
                lane.last_end = end;
            }
            None => lanes.push(Lane {
                members: vec![id],
                last_end: end,
            }),
        }
    }

    let rows: Vec<Vec<ProjectId>> = lanes.into_iter().map(|lane| lane.members).collect();
    let assignments = rows
        .iter()
        .enumerate()
        .flat_map(|(row, members)| members.iter().map(move |id| (*id, row)))
        .collect();

    log::debug!(
        "Packed {} projects into {} rows for {}",
        rows.iter().map(Vec::len).sum::<usize>(),
        rows.len(),
        year
    );

    RowLayout { rows, assignments }
}
