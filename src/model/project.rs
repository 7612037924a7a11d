use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DateParseError;
use crate::timeline::interval::parse_date;

/// Opaque project identifier, minted once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Red / Amber / Green health flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RagStatus {
    Red,
    Amber,
    Green,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl RagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RagStatus::Red => "Red",
            RagStatus::Amber => "Amber",
            RagStatus::Green => "Green",
            RagStatus::Unset => "",
        }
    }

    /// Case-insensitive parse; the empty string means unset.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(RagStatus::Red),
            "amber" => Some(RagStatus::Amber),
            "green" => Some(RagStatus::Green),
            "" => Some(RagStatus::Unset),
            _ => None,
        }
    }
}

/// A single roadmap project.
///
/// Dates are kept as the ISO text they arrived as; they are parsed on demand so a
/// malformed value only knocks its own project off the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub epic_number: String,
    #[serde(alias = "revopsTeam")]
    pub team: String,
    #[serde(default, alias = "impact", alias = "function")]
    pub functions: Vec<String>,
    #[serde(default, alias = "owner", alias = "resources")]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub support: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub rag_status: RagStatus,
}

/// Validated add/edit payload: every project attribute except the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub epic_number: String,
    pub team: String,
    pub functions: Vec<String>,
    pub assignees: Vec<String>,
    pub support: Vec<String>,
    pub dependencies: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub progress: Option<u8>,
    pub rag_status: RagStatus,
}

impl ProjectDraft {
    pub fn new(
        name: impl Into<String>,
        epic_number: impl Into<String>,
        team: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            epic_number: epic_number.into(),
            team: team.into(),
            functions: Vec::new(),
            assignees: Vec::new(),
            support: Vec::new(),
            dependencies: Vec::new(),
            start_date,
            end_date,
            progress: None,
            rag_status: RagStatus::Unset,
        }
    }
}

impl Project {
    /// Create a project with a freshly minted id.
    pub fn from_draft(draft: ProjectDraft) -> Self {
        Self::with_id(ProjectId::new(), draft)
    }

    /// Build a project from a draft while keeping an existing id (edits).
    pub fn with_id(id: ProjectId, draft: ProjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            epic_number: draft.epic_number,
            team: draft.team,
            functions: draft.functions,
            assignees: draft.assignees,
            support: draft.support,
            dependencies: draft.dependencies,
            start_date: format_date(draft.start_date),
            end_date: format_date(draft.end_date),
            progress: draft.progress.map(|p| p.min(100)),
            rag_status: draft.rag_status,
        }
    }

    pub fn start(&self) -> Result<NaiveDate, DateParseError> {
        parse_date(&self.start_date)
    }

    pub fn end(&self) -> Result<NaiveDate, DateParseError> {
        parse_date(&self.end_date)
    }

    /// Both dates, or the first one that fails to parse.
    pub fn dates(&self) -> Result<(NaiveDate, NaiveDate), DateParseError> {
        Ok((self.start()?, self.end()?))
    }

    /// A copy with new dates; nothing else changes.
    pub fn with_dates(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: format_date(start),
            end_date: format_date(end),
            ..self.clone()
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Split a comma-delimited field into trimmed, non-empty entries.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`split_list`], but a lone "None" means no dependencies.
pub fn split_dependencies(s: &str) -> Vec<String> {
    if s.trim().eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    split_list(s)
}

pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}
