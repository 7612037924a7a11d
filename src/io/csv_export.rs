use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::model::{join_list, Project};

/// Export column order.
pub const HEADERS: [&str; 11] = [
    "Project Name",
    "Epic Number",
    "RevOps Team",
    "Function",
    "Assignee",
    "Support",
    "Dependencies",
    "Start Date",
    "End Date",
    "Progress",
    "RAG Status",
];

fn record(project: &Project) -> [String; 11] {
    let dependencies = if project.dependencies.is_empty() {
        "None".to_string()
    } else {
        join_list(&project.dependencies)
    };
    [
        project.name.clone(),
        project.epic_number.clone(),
        project.team.clone(),
        join_list(&project.functions),
        join_list(&project.assignees),
        join_list(&project.support),
        dependencies,
        project.start_date.clone(),
        project.end_date.clone(),
        project.progress.unwrap_or(0).to_string(),
        project.rag_status.as_str().to_string(),
    ]
}

/// Write projects as CSV with a header row. Returns the number of projects written.
pub fn write_projects<W: Write>(projects: &[Project], writer: W) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;
    for project in projects {
        wtr.write_record(record(project))?;
    }
    wtr.flush()?;
    Ok(projects.len())
}

/// Export projects to a CSV file.
pub fn export_csv(projects: &[Project], path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path)?;
    let count = write_projects(projects, file)?;
    log::info!("Exported {} projects to {}", count, path.display());
    Ok(count)
}
