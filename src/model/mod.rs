pub mod board;
pub mod project;

pub use board::Board;
pub use project::{
    format_date, join_list, split_dependencies, split_list, Project, ProjectDraft, ProjectId,
    RagStatus,
};
