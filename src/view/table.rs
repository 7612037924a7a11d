use std::cmp::Ordering;

use crate::model::{join_list, Project};
use crate::timeline::interval::parse_date;

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    EpicNumber,
    Team,
    Function,
    Assignee,
    Support,
    Dependencies,
    StartDate,
    EndDate,
    Progress,
    RagStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Current table sort. `None` key keeps board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Clicking the sorted column flips direction; another column starts ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        match self.key {
            Some(current) if current == key => Self {
                key: Some(key),
                direction: match self.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            },
            _ => Self {
                key: Some(key),
                direction: SortDirection::Ascending,
            },
        }
    }

    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        match self.key {
            Some(key) => sort_projects(projects, key, self.direction),
            None => projects.to_vec(),
        }
    }
}

fn text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Readable dates first, in order; unreadable ones last.
fn dates(a: &Project, b: &Project, field: fn(&Project) -> &str) -> Ordering {
    match (parse_date(field(a)), parse_date(field(b))) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

fn compare(a: &Project, b: &Project, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => text(&a.name, &b.name),
        SortKey::EpicNumber => text(&a.epic_number, &b.epic_number),
        SortKey::Team => text(&a.team, &b.team),
        SortKey::Function => text(&join_list(&a.functions), &join_list(&b.functions)),
        SortKey::Assignee => text(&join_list(&a.assignees), &join_list(&b.assignees)),
        SortKey::Support => text(&join_list(&a.support), &join_list(&b.support)),
        SortKey::Dependencies => text(&join_list(&a.dependencies), &join_list(&b.dependencies)),
        SortKey::StartDate => dates(a, b, |p| p.start_date.as_str()),
        SortKey::EndDate => dates(a, b, |p| p.end_date.as_str()),
        SortKey::Progress => a.progress.unwrap_or(0).cmp(&b.progress.unwrap_or(0)),
        SortKey::RagStatus => a.rag_status.as_str().cmp(b.rag_status.as_str()),
    }
}

/// Stable sort of a copy of `projects` by one column.
pub fn sort_projects(projects: &[Project], key: SortKey, direction: SortDirection) -> Vec<Project> {
    let mut sorted = projects.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Board;

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn toggle_flips_only_the_same_column() {
        let config = SortConfig::default().toggle(SortKey::Name);
        assert_eq!(config.direction, SortDirection::Ascending);
        let config = config.toggle(SortKey::Name);
        assert_eq!(config.direction, SortDirection::Descending);
        let config = config.toggle(SortKey::Team);
        assert_eq!(config, SortConfig { key: Some(SortKey::Team), direction: SortDirection::Ascending });
    }

    #[test]
    fn start_date_sort_is_chronological_with_bad_dates_last() {
        let mut board_projects = Board::sample().projects().to_vec();
        board_projects[0].start_date = "n/a".into();
        let sorted = sort_projects(&board_projects, SortKey::StartDate, SortDirection::Ascending);
        assert_eq!(sorted[0].name, "Mobile App Design");
        assert_eq!(sorted.last().unwrap().name, "Initial Planning & Research");
    }

    #[test]
    fn descending_team_sort_is_stable_within_a_team() {
        let sorted = sort_projects(Board::sample().projects(), SortKey::Team, SortDirection::Descending);
        assert_eq!(
            names(&sorted),
            vec![
                "Initial Planning & Research",
                "User Testing & Feedback",
                "Marketing Launch Campaign",
                "Develop Core Features",
                "API Integration",
                "Q4 Feature Enhancements",
                "Mobile App Design",
            ]
        );
    }

    #[test]
    fn no_key_keeps_board_order() {
        let board = Board::sample();
        assert_eq!(SortConfig::default().apply(board.projects()), board.projects());
    }
}
