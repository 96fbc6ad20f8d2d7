//! Modification service trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::file::{FileKind, FilePreview, LocalFile, UploadedFile};
use crate::modification::{AppliedModification, ColumnModification, ModificationProposal};

/// Transport seam between the workflow controller and the backend.
///
/// The backend is a black box speaking JSON REST; implementations build the
/// requests and normalize failures into [`DatamendError`](crate::DatamendError)
/// values. Tests substitute mock implementations.
#[async_trait]
pub trait ModificationService: Send + Sync {
    /// Uploads a candidate file.
    ///
    /// # Arguments
    /// * `file` - The validated candidate; the service derives the
    ///   `file_type` field from its name
    ///
    /// # Returns
    /// The backend's record of the accepted file.
    async fn upload_file(&self, file: &LocalFile) -> Result<UploadedFile>;

    /// Fetches a bounded sample of an uploaded file's rows.
    ///
    /// # Arguments
    /// * `file_id` - Backend id of the uploaded file
    /// * `rows` - Optional sample window; the backend clamps it to 1..=100
    async fn fetch_preview(&self, file_id: i64, rows: Option<u32>) -> Result<FilePreview>;

    /// Asks the backend to infer a modification from a natural-language
    /// instruction and preview its effect.
    async fn request_modification(
        &self,
        file_id: i64,
        instruction: &str,
    ) -> Result<ModificationProposal>;

    /// Commits a previewed modification to the entire dataset.
    async fn apply_modification(
        &self,
        file_id: i64,
        modification: &ColumnModification,
    ) -> Result<AppliedModification>;

    /// Lists uploaded files, optionally filtered by declared type.
    async fn list_files(&self, kind: Option<FileKind>) -> Result<Vec<UploadedFile>>;

    /// Deletes an uploaded file and its stored content.
    async fn delete_file(&self, file_id: i64) -> Result<()>;
}
