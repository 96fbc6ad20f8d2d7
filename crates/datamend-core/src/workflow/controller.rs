use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::file::{DEFAULT_MAX_UPLOAD_MB, LocalFile, Validation, validate_upload};
use crate::modification::{ModificationInfo, ProcessedFileRecord, is_confidence_acceptable};

use super::service::ModificationService;
use super::state::{Outcome, WorkflowState};

/// Orchestrates the upload → preview → modify → apply sequence.
///
/// `WorkflowController` owns the session's [`WorkflowState`] exclusively.
/// Every transition validates its preconditions under the state lock,
/// performs at most one backend call through the [`ModificationService`]
/// seam, folds the result back into the state, and publishes a snapshot to
/// the watch channel. Errors never escape a transition: they land in
/// `WorkflowState::error` as a single human-readable string.
///
/// Each of upload, modify, and apply carries its own in-flight flag; a
/// second invocation while one is pending is refused without touching the
/// state. Different transition kinds are not serialized against each other.
pub struct WorkflowController {
    service: Arc<dyn ModificationService>,
    state: RwLock<WorkflowState>,
    snapshots: watch::Sender<WorkflowState>,
}

impl WorkflowController {
    /// Creates a controller with an empty workflow state.
    pub fn new(service: Arc<dyn ModificationService>) -> Self {
        let (snapshots, _) = watch::channel(WorkflowState::default());
        Self {
            service,
            state: RwLock::new(WorkflowState::default()),
            snapshots,
        }
    }

    /// Subscribes to state snapshots.
    ///
    /// The rendering layer observes the workflow through this channel
    /// instead of embedding the state machine in view code; a snapshot is
    /// published after every transition.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.snapshots.subscribe()
    }

    /// Returns a snapshot of the current state.
    pub async fn state(&self) -> WorkflowState {
        self.state.read().await.clone()
    }

    fn publish(&self, state: &WorkflowState) {
        self.snapshots.send_replace(state.clone());
    }

    /// Validates and uploads a candidate file.
    ///
    /// A validation rejection sets the error and makes no network call. On
    /// success the new file replaces any previous one, proposal and error
    /// are cleared, and the original preview is fetched best-effort. On
    /// failure the previous file (if any) is retained and the normalized
    /// message lands in the error slot.
    pub async fn submit_upload(&self, candidate: &LocalFile) -> Outcome {
        {
            let mut state = self.state.write().await;
            if state.uploading {
                return Outcome::Refused;
            }
            match validate_upload(&candidate.name, candidate.size(), DEFAULT_MAX_UPLOAD_MB) {
                Validation::Rejected { reason } => {
                    state.error = reason;
                    self.publish(&state);
                    return Outcome::Completed;
                }
                Validation::Accepted => {
                    state.uploading = true;
                    state.error.clear();
                    self.publish(&state);
                }
            }
        }

        let result = self.service.upload_file(candidate).await;

        let uploaded = {
            let mut state = self.state.write().await;
            state.uploading = false;
            let uploaded = match result {
                Ok(file) => {
                    tracing::debug!(file_id = file.id, name = %file.name, "file uploaded");
                    let id = file.id;
                    state.file = Some(file);
                    state.original_preview = None;
                    state.proposal = None;
                    state.error.clear();
                    Some(id)
                }
                Err(err) => {
                    state.error = err.user_message();
                    None
                }
            };
            self.publish(&state);
            uploaded
        };

        if uploaded.is_some() {
            self.load_preview(None).await;
        }
        Outcome::Completed
    }

    /// Fetches a sample of the current file's unmodified rows.
    ///
    /// Best-effort: a failure is logged and leaves the state untouched, so
    /// a missing preview never blocks the modification workflow.
    pub async fn load_preview(&self, rows: Option<u32>) -> Outcome {
        let file_id = {
            let state = self.state.read().await;
            match &state.file {
                Some(file) => file.id,
                None => return Outcome::Refused,
            }
        };

        match self.service.fetch_preview(file_id, rows).await {
            Ok(preview) => {
                let mut state = self.state.write().await;
                state.original_preview = Some(preview);
                self.publish(&state);
            }
            Err(err) => {
                tracing::warn!(file_id, error = %err, "failed to load file preview");
            }
        }
        Outcome::Completed
    }

    /// Sends a natural-language instruction for the current file.
    ///
    /// Refused without a file, with a blank instruction, or while a modify
    /// request is already in flight. On success the proposal replaces any
    /// previous one; on failure the error is set and the previous proposal
    /// is left unchanged.
    pub async fn request_modification(&self, instruction: &str) -> Outcome {
        let trimmed = instruction.trim();

        let file_id = {
            let mut state = self.state.write().await;
            if state.generating {
                return Outcome::Refused;
            }
            let Some(file) = &state.file else {
                return Outcome::Refused;
            };
            if trimmed.is_empty() {
                return Outcome::Refused;
            }
            let id = file.id;
            state.generating = true;
            state.error.clear();
            self.publish(&state);
            id
        };

        let result = self.service.request_modification(file_id, trimmed).await;

        let mut state = self.state.write().await;
        state.generating = false;
        match result {
            Ok(proposal) => {
                tracing::debug!(
                    file_id,
                    column = %proposal.modification.column_name,
                    confidence = proposal.modification.confidence,
                    "modification proposal received"
                );
                state.proposal = Some(proposal);
                state.error.clear();
            }
            Err(err) => {
                state.error = err.user_message();
            }
        }
        self.publish(&state);
        Outcome::Completed
    }

    /// Discards the pending proposal, keeping the file and any error.
    pub async fn cancel_proposal(&self) -> Outcome {
        let mut state = self.state.write().await;
        if state.proposal.take().is_none() {
            return Outcome::Refused;
        }
        self.publish(&state);
        Outcome::Completed
    }

    /// Clears the proposal and error so a new instruction can start fresh.
    /// The uploaded file is untouched.
    pub async fn reset_instruction(&self) -> Outcome {
        let mut state = self.state.write().await;
        state.proposal = None;
        state.error.clear();
        self.publish(&state);
        Outcome::Completed
    }

    /// Commits the pending proposal to the entire dataset.
    ///
    /// Refused without a proposal, below the confidence threshold, or while
    /// an apply is already in flight. On success a [`ProcessedFileRecord`]
    /// is prepended to the audit trail and the form resets. An apply
    /// failure also resets the form without surfacing the error: the
    /// original treats apply as fire-and-forget, and that behavior is
    /// preserved deliberately (logged for operators only).
    pub async fn apply_proposal(&self) -> Outcome {
        let (file_id, modification) = {
            let mut state = self.state.write().await;
            if state.applying {
                return Outcome::Refused;
            }
            let Some(file) = &state.file else {
                return Outcome::Refused;
            };
            let Some(proposal) = &state.proposal else {
                return Outcome::Refused;
            };
            if !is_confidence_acceptable(proposal.modification.confidence) {
                return Outcome::Refused;
            }
            let id = file.id;
            let modification = proposal.modification.clone();
            state.applying = true;
            state.error.clear();
            self.publish(&state);
            (id, modification)
        };

        let result = self.service.apply_modification(file_id, &modification).await;

        let mut state = self.state.write().await;
        state.applying = false;
        match result {
            Ok(applied) => {
                tracing::debug!(
                    file_id,
                    processed_id = applied.processed_file.id,
                    modified_rows = applied.stats.modified_rows,
                    "modification applied"
                );
                let record = ProcessedFileRecord {
                    id: applied.processed_file.id,
                    name: applied.processed_file.name,
                    file_url: applied.processed_file.file_url,
                    created_at: chrono::Utc::now().to_rfc3339(),
                    stats: applied.stats,
                    modification: ModificationInfo {
                        column_name: modification.column_name,
                        description: modification.description,
                    },
                };
                state.processed_files.insert(0, record);
                state.proposal = None;
                state.error.clear();
            }
            Err(err) => {
                tracing::warn!(file_id, error = %err, "apply request failed; form reset anyway");
                state.proposal = None;
                state.error.clear();
            }
        }
        self.publish(&state);
        Outcome::Completed
    }

    /// Discards the file, preview, proposal, and error, returning the
    /// workflow to its empty state.
    pub async fn upload_different_file(&self) -> Outcome {
        let mut state = self.state.write().await;
        state.file = None;
        state.original_preview = None;
        state.proposal = None;
        state.error.clear();
        self.publish(&state);
        Outcome::Completed
    }
}
