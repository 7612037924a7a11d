use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{ImportError, ImportRowError, RowErrorKind};
use crate::model::{format_date, split_dependencies, split_list, Project, ProjectId, RagStatus};

/// Columns understood by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Epic,
    Team,
    Function,
    Assignee,
    Support,
    Dependencies,
    Start,
    End,
    Progress,
    Rag,
}

/// Positional order. The first nine columns are the original schema; the
/// extended export only appends to it.
const POSITIONAL: [Column; 11] = [
    Column::Name,
    Column::Epic,
    Column::Team,
    Column::Function,
    Column::Assignee,
    Column::Support,
    Column::Dependencies,
    Column::Start,
    Column::End,
    Column::Progress,
    Column::Rag,
];

/// Try parsing a date string with the accepted formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_col(normalized: &str) -> Option<Column> {
    match normalized {
        "projectname" | "name" | "project" => Some(Column::Name),
        "epicnumber" | "epic" => Some(Column::Epic),
        "team" | "revopsteam" => Some(Column::Team),
        "impact" | "function" => Some(Column::Function),
        "owner" | "assignee" | "resources" => Some(Column::Assignee),
        "support" => Some(Column::Support),
        "dependencies" | "dependency" => Some(Column::Dependencies),
        "startdate" | "start" => Some(Column::Start),
        "enddate" | "end" => Some(Column::End),
        "progress" => Some(Column::Progress),
        "ragstatus" | "rag" => Some(Column::Rag),
        _ => None,
    }
}

/// A header row is recognized by a cell that is exactly one of the key column
/// titles. Matching whole cells keeps owners like "Dev Team A" from reading as
/// a header.
fn looks_like_header(cells: &[String]) -> bool {
    cells.iter().any(|cell| {
        matches!(
            normalize_header(cell).as_str(),
            "projectname" | "epicnumber" | "team" | "revopsteam" | "impact"
        )
    })
}

/// Map header cells to columns, or `None` if a required column is not named.
fn header_columns(cells: &[String]) -> Option<Vec<Option<Column>>> {
    let cols: Vec<Option<Column>> = cells
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();
    let has = |c: Column| cols.contains(&Some(c));
    let complete = [Column::Name, Column::Epic, Column::Team, Column::Start, Column::End]
        .into_iter()
        .all(has);
    complete.then_some(cols)
}

#[derive(Default)]
struct RawRow<'a> {
    name: &'a str,
    epic: &'a str,
    team: &'a str,
    function: &'a str,
    assignee: &'a str,
    support: &'a str,
    dependencies: &'a str,
    start: &'a str,
    end: &'a str,
    progress: &'a str,
    rag: &'a str,
}

impl<'a> RawRow<'a> {
    fn from_cells(cells: &'a [String], columns: &[Option<Column>]) -> Self {
        let mut raw = RawRow::default();
        for (value, column) in cells.iter().zip(columns) {
            let value = value.as_str();
            match column {
                Some(Column::Name) => raw.name = value,
                Some(Column::Epic) => raw.epic = value,
                Some(Column::Team) => raw.team = value,
                Some(Column::Function) => raw.function = value,
                Some(Column::Assignee) => raw.assignee = value,
                Some(Column::Support) => raw.support = value,
                Some(Column::Dependencies) => raw.dependencies = value,
                Some(Column::Start) => raw.start = value,
                Some(Column::End) => raw.end = value,
                Some(Column::Progress) => raw.progress = value,
                Some(Column::Rag) => raw.rag = value,
                None => {}
            }
        }
        raw
    }

    fn into_project(self, row: usize) -> Result<Project, ImportRowError> {
        let fail = |kind| ImportRowError { row, kind };

        if [self.name, self.epic, self.team, self.start, self.end]
            .iter()
            .any(|v| v.is_empty())
        {
            return Err(fail(RowErrorKind::Incomplete));
        }

        let start = parse_date(self.start).ok_or_else(|| fail(RowErrorKind::InvalidDate(self.start.to_string())))?;
        let end = parse_date(self.end).ok_or_else(|| fail(RowErrorKind::InvalidDate(self.end.to_string())))?;

        let progress = match self.progress.trim_end_matches('%') {
            "" => None,
            p => match p.trim().parse::<u8>() {
                Ok(v) if v <= 100 => Some(v),
                _ => return Err(fail(RowErrorKind::InvalidProgress(self.progress.to_string()))),
            },
        };

        let rag_status = RagStatus::parse(self.rag)
            .ok_or_else(|| fail(RowErrorKind::InvalidRagStatus(self.rag.to_string())))?;

        Ok(Project {
            id: ProjectId::new(),
            name: self.name.to_string(),
            epic_number: self.epic.to_string(),
            team: self.team.to_string(),
            functions: split_list(self.function),
            assignees: split_list(self.assignee),
            support: split_list(self.support),
            dependencies: split_dependencies(self.dependencies),
            start_date: format_date(start),
            end_date: format_date(end),
            progress,
            rag_status,
        })
    }
}

/// Read projects from CSV.
///
/// The header row is optional and detected by keyword. Every row must carry a
/// project name, epic number, team, start and end date. The first bad row aborts
/// the whole import; nothing is returned for the rows before it.
pub fn read_projects<R: Read>(reader: R) -> Result<Vec<Project>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    let Some(first) = rows.first() else {
        return Err(ImportError::Empty);
    };

    let has_header = looks_like_header(first);
    let columns = if has_header {
        header_columns(first).unwrap_or_else(|| POSITIONAL.iter().copied().map(Some).collect())
    } else {
        POSITIONAL.iter().copied().map(Some).collect()
    };
    let skip = usize::from(has_header);

    if rows.len() <= skip {
        return Err(ImportError::Empty);
    }

    let projects = rows
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(index, cells)| RawRow::from_cells(cells, &columns).into_project(index + 1))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Imported {} projects from CSV", projects.len());
    Ok(projects)
}

/// Import projects from a CSV file.
pub fn import_csv(path: &Path) -> Result<Vec<Project>, ImportError> {
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_projects(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(content: &str) -> Result<Vec<Project>, ImportError> {
        read_projects(content.as_bytes())
    }

    #[test]
    fn legacy_rows_without_header() {
        let projects = import(
            "Core,EPIC-2,Engineering,High,\"Dev Team A, QA\",Architecture,None,2024-03-01,2024-06-15\n",
        )
        .unwrap();
        assert_eq!(projects.len(), 1);
        let p = &projects[0];
        assert_eq!(p.assignees, vec!["Dev Team A", "QA"]);
        assert_eq!(p.functions, vec!["High"]);
        assert!(p.dependencies.is_empty());
        assert_eq!(p.start_date, "2024-03-01");
        assert_eq!(p.progress, None);
    }

    #[test]
    fn header_is_skipped_and_counted_in_row_numbers() {
        let err = import(
            "Project Name,Epic Number,Team,Impact,Owner,Support,Dependencies,Start Date,End Date\n\
             Core,EPIC-2,Engineering,High,Dev,Arch,None,2024-03-01,2024-06-15\n\
             Broken,EPIC-3,Engineering,High,Dev,Arch,None,,2024-06-15\n",
        )
        .unwrap_err();
        match err {
            ImportError::Row(ImportRowError { row, kind }) => {
                assert_eq!(row, 3);
                assert_eq!(kind, RowErrorKind::Incomplete);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extended_header_maps_columns_by_name() {
        let projects = import(
            "RevOps Team,Project Name,Epic Number,Start Date,End Date,Progress,RAG Status,Assignee\n\
             Sales Ops,Pipeline,EPIC-9,2024/05/01,06/30/2024,40%,amber,\"Ana, Bo\"\n",
        )
        .unwrap();
        let p = &projects[0];
        assert_eq!(p.name, "Pipeline");
        assert_eq!(p.team, "Sales Ops");
        assert_eq!(p.start_date, "2024-05-01");
        assert_eq!(p.end_date, "2024-06-30");
        assert_eq!(p.progress, Some(40));
        assert_eq!(p.rag_status, RagStatus::Amber);
        assert_eq!(p.assignees, vec!["Ana", "Bo"]);
    }

    #[test]
    fn invalid_date_names_the_row() {
        let err = import("Core,EPIC-2,Eng,,,,,2024-02-30,2024-06-15\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Row 1 has an invalid date '2024-02-30'. Please use a valid date format (e.g., YYYY-MM-DD)"
        );
    }

    #[test]
    fn bad_progress_and_rag_are_rejected() {
        let err = import("A,E,T,,,,,2024-01-01,2024-01-02,250\n").unwrap_err();
        assert!(matches!(err, ImportError::Row(ImportRowError { kind: RowErrorKind::InvalidProgress(_), .. })));
        let err = import("A,E,T,,,,,2024-01-01,2024-01-02,10,Purple\n").unwrap_err();
        assert!(matches!(err, ImportError::Row(ImportRowError { kind: RowErrorKind::InvalidRagStatus(_), .. })));
    }

    #[test]
    fn header_only_or_blank_file_is_empty() {
        assert!(matches!(import(""), Err(ImportError::Empty)));
        assert!(matches!(
            import("Project Name,Epic Number,Team,Impact,Owner,Support,Dependencies,Start Date,End Date\n"),
            Err(ImportError::Empty)
        ));
    }

    #[test]
    fn blank_lines_do_not_shift_row_numbers() {
        let err = import("A,E,T,,,,,2024-01-01,2024-01-02\n\n,E,T,,,,,2024-01-01,2024-01-02\n").unwrap_err();
        assert!(matches!(err, ImportError::Row(ImportRowError { row: 2, .. })));
    }

    #[test]
    fn each_row_gets_a_fresh_id() {
        let projects = import(
            "A,E,T,,,,,2024-01-01,2024-01-02\nB,E,T,,,,,2024-01-01,2024-01-02\n",
        )
        .unwrap();
        assert_ne!(projects[0].id, projects[1].id);
    }
}
