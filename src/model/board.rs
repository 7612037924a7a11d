use chrono::{DateTime, NaiveDate, Utc};

use super::project::{Project, ProjectDraft, ProjectId};
use crate::sequencing::{reconcile, SequencingResponse};
use crate::timeline::{pack_rows, reschedule, DragGesture, RowLayout, YearViewport};

/// The roadmap board: every project currently loaded, in display order.
///
/// Mutations never edit the project list in place; each one builds the next list
/// and swaps it in, so a slice handed out earlier stays a consistent snapshot.
#[derive(Debug, Clone)]
pub struct Board {
    pub name: String,
    projects: Vec<Project>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            name: "Untitled Roadmap".to_string(),
            projects: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_projects(name: impl Into<String>, projects: Vec<Project>) -> Self {
        Self {
            projects,
            ..Self::new(name)
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// First project with this exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    fn replace(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.touch();
    }

    pub fn add(&mut self, draft: ProjectDraft) -> ProjectId {
        let project = Project::from_draft(draft);
        let id = project.id;
        log::info!("Added project '{}'", project.name);
        let mut next = self.projects.clone();
        next.push(project);
        self.replace(next);
        id
    }

    /// Replace a project's attributes, keeping its id. Returns false for unknown ids.
    pub fn update(&mut self, id: ProjectId, draft: ProjectDraft) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        log::info!("Updated project '{}'", draft.name);
        let updated = Project::with_id(id, draft);
        let next = self
            .projects
            .iter()
            .map(|p| if p.id == id { updated.clone() } else { p.clone() })
            .collect();
        self.replace(next);
        true
    }

    pub fn remove(&mut self, id: ProjectId) -> bool {
        let next: Vec<Project> = self.projects.iter().filter(|p| p.id != id).cloned().collect();
        if next.len() == self.projects.len() {
            return false;
        }
        log::info!("Deleted project {}", id);
        self.replace(next);
        true
    }

    /// Delete every project.
    pub fn clear(&mut self) {
        log::info!("Deleted all {} projects", self.projects.len());
        self.replace(Vec::new());
    }

    /// Append already-validated projects (e.g. a whole CSV import).
    pub fn extend(&mut self, projects: Vec<Project>) {
        log::info!("Appending {} projects", projects.len());
        let mut next = self.projects.clone();
        next.extend(projects);
        self.replace(next);
    }

    /// Move one project by a drag gesture. Returns false when nothing moved:
    /// unknown id, unparsable dates, or a drop on the bar's own position.
    pub fn reschedule(&mut self, id: ProjectId, gesture: &DragGesture, viewport: &YearViewport) -> bool {
        let Some(current) = self.get(id) else {
            return false;
        };
        let moved = reschedule(current, gesture, viewport);
        if &moved == current {
            return false;
        }
        let next = self
            .projects
            .iter()
            .map(|p| if p.id == id { moved.clone() } else { p.clone() })
            .collect();
        self.replace(next);
        true
    }

    /// Reorder the board after a sequencing call over `candidates`.
    pub fn apply_sequence(&mut self, candidates: &[ProjectId], response: &SequencingResponse) {
        let next = reconcile(&self.projects, candidates, response);
        self.replace(next);
    }

    pub fn layout(&self, year: i32) -> RowLayout {
        pack_rows(&self.projects, year)
    }

    /// The demo roadmap a fresh board starts with.
    pub fn sample() -> Self {
        let entries = [
            ("Initial Planning & Research", "EPIC-001", "Strategy", "High", (2024, 1, 15), (2024, 2, 28), "PM, UX Researcher", "IT", "None"),
            ("Develop Core Features", "EPIC-002", "Engineering", "High", (2024, 3, 1), (2024, 6, 15), "Dev Team A, QA", "Architecture", "Initial Planning & Research"),
            ("Mobile App Design", "EPIC-007", "Design", "Medium", (2024, 2, 1), (2024, 4, 30), "UI/UX Designer", "Design System Team", "Initial Planning & Research"),
            ("API Integration", "EPIC-006", "Engineering", "Medium", (2024, 4, 15), (2024, 5, 30), "Dev Team A", "DevOps", "Develop Core Features"),
            ("User Testing & Feedback", "EPIC-003", "QA & UX", "Medium", (2024, 6, 16), (2024, 7, 31), "Test Group, UX Designer", "Analytics", "Develop Core Features"),
            ("Marketing Launch Campaign", "EPIC-004", "Marketing", "High", (2024, 8, 1), (2024, 9, 15), "Marketing Team", "Sales", "Develop Core Features"),
            ("Q4 Feature Enhancements", "EPIC-005", "Engineering", "Low", (2024, 10, 1), (2024, 11, 30), "Dev Team B", "Architecture", "User Testing & Feedback"),
        ];

        let projects = entries
            .into_iter()
            .filter_map(|(name, epic, team, impact, start, end, owners, support, deps)| {
                let start = NaiveDate::from_ymd_opt(start.0, start.1, start.2)?;
                let end = NaiveDate::from_ymd_opt(end.0, end.1, end.2)?;
                let mut draft = ProjectDraft::new(name, epic, team, start, end);
                draft.functions = super::split_list(impact);
                draft.assignees = super::split_list(owners);
                draft.support = super::split_list(support);
                draft.dependencies = super::split_dependencies(deps);
                Some(Project::from_draft(draft))
            })
            .collect();

        Self::with_projects("Sample Roadmap", projects)
    }
}
