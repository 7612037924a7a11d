use std::collections::HashSet;

use super::SequencingResponse;
use crate::model::{Project, ProjectId};

/// Reorder `all` after a sequencing call over `candidates`.
///
/// Candidates named in the response come first, in response order. Candidates the
/// response left out follow in their original order, then every project that was
/// not a candidate, unchanged. Unknown names are dropped and a name is placed at
/// most once.
pub fn reconcile(
    all: &[Project],
    candidates: &[ProjectId],
    response: &SequencingResponse,
) -> Vec<Project> {
    let candidate_set: HashSet<ProjectId> = candidates.iter().copied().collect();
    let mut placed: HashSet<ProjectId> = HashSet::new();
    let mut ordered: Vec<Project> = Vec::with_capacity(all.len());

    for name in &response.optimal_sequence {
        let hit = all
            .iter()
            .find(|p| candidate_set.contains(&p.id) && !placed.contains(&p.id) && p.name == *name);
        match hit {
            Some(project) => {
                placed.insert(project.id);
                ordered.push(project.clone());
            }
            None => log::debug!("Sequencing named unknown or repeated project '{}'", name),
        }
    }

    ordered.extend(
        all.iter()
            .filter(|p| candidate_set.contains(&p.id) && !placed.contains(&p.id))
            .cloned(),
    );
    ordered.extend(all.iter().filter(|p| !candidate_set.contains(&p.id)).cloned());
    ordered
}
