use std::collections::{BTreeSet, HashSet};

use crate::model::Project;

/// Multi-field board filter. An empty selection places no constraint on its field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub teams: HashSet<String>,
    pub functions: HashSet<String>,
    pub assignees: HashSet<String>,
    pub support: HashSet<String>,
    pub dependencies: HashSet<String>,
}

fn any_selected(selected: &HashSet<String>, values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

impl ProjectFilter {
    pub fn is_active(&self) -> bool {
        !(self.teams.is_empty()
            && self.functions.is_empty()
            && self.assignees.is_empty()
            && self.support.is_empty()
            && self.dependencies.is_empty())
    }

    pub fn matches(&self, project: &Project) -> bool {
        (self.teams.is_empty() || self.teams.contains(&project.team))
            && any_selected(&self.functions, &project.functions)
            && any_selected(&self.assignees, &project.assignees)
            && any_selected(&self.support, &project.support)
            && any_selected(&self.dependencies, &project.dependencies)
    }

    /// Matching projects, in board order.
    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        if !self.is_active() {
            return projects.to_vec();
        }
        projects.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Sorted distinct values offered by each filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub teams: Vec<String>,
    pub functions: Vec<String>,
    pub assignees: Vec<String>,
    pub support: Vec<String>,
    pub dependencies: Vec<String>,
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl FilterOptions {
    pub fn collect(projects: &[Project]) -> Self {
        Self {
            teams: distinct(projects.iter().map(|p| &p.team)),
            functions: distinct(projects.iter().flat_map(|p| &p.functions)),
            assignees: distinct(projects.iter().flat_map(|p| &p.assignees)),
            support: distinct(projects.iter().flat_map(|p| &p.support)),
            dependencies: distinct(
                projects
                    .iter()
                    .flat_map(|p| &p.dependencies)
                    .filter(|d| !d.eq_ignore_ascii_case("none")),
            ),
        }
    }
}
