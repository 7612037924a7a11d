use std::fs;

use pretty_assertions::assert_eq;

use roadmap_board::error::{ImportError, ImportRowError, RowErrorKind};
use roadmap_board::io::{export_csv, import_csv};
use roadmap_board::model::{Board, Project, RagStatus};

fn comparable(projects: &[Project]) -> Vec<(String, String, String, Vec<String>, Vec<String>, String, String)> {
    projects
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                p.epic_number.clone(),
                p.team.clone(),
                p.assignees.clone(),
                p.dependencies.clone(),
                p.start_date.clone(),
                p.end_date.clone(),
            )
        })
        .collect()
}

#[test]
fn exported_board_imports_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmap.csv");

    let mut board = Board::sample();
    let first = board.projects()[0].id;
    let mut projects = board.projects().to_vec();
    projects[0].progress = Some(35);
    projects[0].rag_status = RagStatus::Amber;
    board.clear();
    board.extend(projects);

    assert_eq!(export_csv(board.projects(), &path).unwrap(), 7);
    let imported = import_csv(&path).unwrap();

    assert_eq!(comparable(&imported), comparable(board.projects()));
    assert_eq!(imported[0].progress, Some(35));
    assert_eq!(imported[0].rag_status, RagStatus::Amber);
    assert!(imported.iter().all(|p| p.id != first));
}

#[test]
fn one_bad_row_rejects_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        "Initial Planning,EPIC-001,Strategy,High,PM,IT,None,2024-01-15,2024-02-28\n\
         Core Features,EPIC-002,Engineering,High,Dev,Arch,None,,2024-06-15\n",
    )
    .unwrap();

    let mut board = Board::new("Roadmap");
    match import_csv(&path) {
        Ok(projects) => board.extend(projects),
        Err(ImportError::Row(ImportRowError { row, kind })) => {
            assert_eq!(row, 2);
            assert_eq!(kind, RowErrorKind::Incomplete);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
    assert!(board.is_empty());
}

#[test]
fn missing_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    let err = import_csv(&path).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
    assert!(err.to_string().contains("nope.csv"));
}
