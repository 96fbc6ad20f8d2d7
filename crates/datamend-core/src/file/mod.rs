//! Uploaded-file domain: models and pre-flight validation.

pub mod model;
pub mod validate;

pub use model::{FileKind, FilePreview, LocalFile, Row, UploadedFile};
pub use validate::{DEFAULT_MAX_UPLOAD_MB, Validation, classify_kind, validate_upload};
