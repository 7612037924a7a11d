//! Contract with the external AI planning service.
//!
//! Nothing here decides an order. The service does; this side builds the
//! request, parses the answer and folds it back into the board.

pub mod client;
pub mod reconcile;
pub mod request;

pub use client::{SequencingClient, SequencingService};
pub use reconcile::reconcile;
pub use request::{parse_response, SequencingProject, SequencingRequest, SequencingResponse};

use crate::error::SequencingError;

/// A service that answers with a response captured earlier, e.g. one saved
/// from the model's output.
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    raw: String,
}

impl RecordedResponse {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl SequencingService for RecordedResponse {
    fn suggest(&self, _request: &SequencingRequest) -> Result<SequencingResponse, SequencingError> {
        parse_response(&self.raw)
    }
}
