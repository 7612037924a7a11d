use super::{SequencingRequest, SequencingResponse};
use crate::error::SequencingError;
use crate::model::{Board, Project, ProjectId};

/// The external planning service.
///
/// Given projects and a free-text availability note it returns an ordered list of
/// project names plus its reasoning. The ordering decision is made entirely by the
/// service; transport, retries and timeouts belong to the implementation.
#[cfg_attr(test, mockall::automock)]
pub trait SequencingService {
    fn suggest(&self, request: &SequencingRequest) -> Result<SequencingResponse, SequencingError>;
}

/// Drives one "optimize" action against a board.
pub struct SequencingClient<S> {
    service: S,
}

impl<S: SequencingService> SequencingClient<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Ask the service to order `candidates`.
    pub fn request(
        &self,
        candidates: &[Project],
        team_availability: &str,
    ) -> Result<SequencingResponse, SequencingError> {
        if candidates.is_empty() {
            return Err(SequencingError::NoCandidates);
        }

        let request = SequencingRequest::new(candidates, team_availability);
        log::info!("Requesting sequence for {} projects", candidates.len());
        self.service.suggest(&request).map_err(|e| {
            log::error!("AI sequencing failed: {}", e);
            e
        })
    }

    /// Sequence `candidates` and reorder the board. On any failure the board is
    /// left exactly as it was.
    pub fn optimize(
        &self,
        board: &mut Board,
        candidates: &[Project],
        team_availability: &str,
    ) -> Result<SequencingResponse, SequencingError> {
        let response = self.request(candidates, team_availability)?;
        let ids: Vec<ProjectId> = candidates.iter().map(|p| p.id).collect();
        board.apply_sequence(&ids, &response);
        Ok(response)
    }
}
