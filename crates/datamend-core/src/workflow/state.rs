use serde::{Deserialize, Serialize};

use crate::file::{FilePreview, UploadedFile};
use crate::modification::{ModificationProposal, ProcessedFileRecord};

/// The session-scoped workflow aggregate.
///
/// Exclusively owned by one [`WorkflowController`](super::WorkflowController)
/// per session and never persisted; renderers receive cloned snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowState {
    /// The current uploaded file, if any
    pub file: Option<UploadedFile>,
    /// Sample of the unmodified file, loaded best-effort after upload
    pub original_preview: Option<FilePreview>,
    /// The current not-yet-applied proposal, if any
    pub proposal: Option<ModificationProposal>,
    /// Current error message; empty means none
    pub error: String,
    /// Audit trail of committed modifications, newest first
    pub processed_files: Vec<ProcessedFileRecord>,
    /// Upload request in flight
    pub uploading: bool,
    /// Modify request in flight
    pub generating: bool,
    /// Apply request in flight
    pub applying: bool,
}

impl WorkflowState {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// The coarse position in the upload → modify → apply sequence.
    pub fn phase(&self) -> WorkflowPhase {
        match (&self.file, &self.proposal) {
            (None, _) => WorkflowPhase::Empty,
            (Some(_), None) => WorkflowPhase::FileLoaded,
            (Some(_), Some(_)) => WorkflowPhase::ProposalReady,
        }
    }
}

/// Coarse workflow position derived from the state aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    /// No file uploaded yet
    Empty,
    /// A file is uploaded, no proposal pending
    FileLoaded,
    /// A proposal awaits cancel or apply
    ProposalReady,
}

/// Result of invoking a workflow transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The transition ran; inspect the state for its effect
    Completed,
    /// Precondition unmet or an identical request is in flight; state
    /// untouched
    Refused,
}

impl Outcome {
    pub fn is_refused(&self) -> bool {
        matches!(self, Outcome::Refused)
    }
}
