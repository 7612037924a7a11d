use std::collections::{BTreeSet, HashMap};

use crate::model::Project;

/// Team bar colours as CSS HSL components.
pub const TEAM_COLORS: [&str; 12] = [
    "210 90% 55%",
    "340 85% 60%",
    "145 70% 45%",
    "35 95% 55%",
    "265 80% 65%",
    "190 85% 50%",
    "50 100% 55%",
    "280 70% 60%",
    "0 80% 60%",
    "170 75% 45%",
    "300 80% 65%",
    "25 90% 50%",
];

/// Stable team to colour mapping for one set of projects. Teams are ranked in
/// sorted order and wrap around the palette; unknown teams get the first colour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPalette {
    indices: HashMap<String, usize>,
}

impl TeamPalette {
    pub fn new(projects: &[Project]) -> Self {
        let teams: BTreeSet<&str> = projects
            .iter()
            .map(|p| p.team.as_str())
            .filter(|t| !t.is_empty())
            .collect();
        let indices = teams
            .into_iter()
            .enumerate()
            .map(|(i, team)| (team.to_string(), i % TEAM_COLORS.len()))
            .collect();
        Self { indices }
    }

    pub fn index_of(&self, team: &str) -> usize {
        self.indices.get(team).copied().unwrap_or(0)
    }

    pub fn color_of(&self, team: &str) -> String {
        format!("hsl({})", TEAM_COLORS[self.index_of(team)])
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{Board, ProjectDraft};

    fn on_team(team: &str) -> Project {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Project::from_draft(ProjectDraft::new("P", "E", team, d, d))
    }

    #[test]
    fn teams_rank_alphabetically() {
        let palette = TeamPalette::new(Board::sample().projects());
        // Design, Engineering, Marketing, QA & UX, Strategy
        assert_eq!(palette.index_of("Design"), 0);
        assert_eq!(palette.index_of("Engineering"), 1);
        assert_eq!(palette.index_of("Strategy"), 4);
        assert_eq!(palette.color_of("Engineering"), "hsl(340 85% 60%)");
    }

    #[test]
    fn palette_wraps_and_unknown_teams_fall_back() {
        let projects: Vec<Project> = (0..14).map(|i| on_team(&format!("Team {:02}", i))).collect();
        let palette = TeamPalette::new(&projects);
        assert_eq!(palette.index_of("Team 11"), 11);
        assert_eq!(palette.index_of("Team 12"), 0);
        assert_eq!(palette.index_of("Team 13"), 1);
        assert_eq!(palette.index_of("Nobody"), 0);
        assert_eq!(palette.color_of("Nobody"), "hsl(210 90% 55%)");
    }
}
