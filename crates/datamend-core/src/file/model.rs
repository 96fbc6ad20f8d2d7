use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{DatamendError, Result};

/// Declared type of an uploaded data file.
///
/// The backend only distinguishes CSV from Excel; which Excel engine to use
/// is decided server-side from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Csv,
    Excel,
}

impl FileKind {
    /// The wire value used in the `file_type` form field and query filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Csv => "csv",
            FileKind::Excel => "excel",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = DatamendError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(FileKind::Csv),
            "excel" => Ok(FileKind::Excel),
            other => Err(DatamendError::validation(format!(
                "file type must be csv or excel, got '{other}'"
            ))),
        }
    }
}

/// A single preview row: column name mapped to a scalar cell value.
///
/// Column order is carried separately in the `columns` list of the
/// surrounding payload, as the backend sends it.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A file record accepted by the backend after upload.
///
/// Immutable for the session: a re-upload produces a new record with a new
/// id, never a mutation of an old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Backend-assigned unique identifier
    pub id: i64,
    /// Original filename
    pub name: String,
    /// Declared type (`csv` or `excel`)
    pub file_type: FileKind,
    /// File size in bytes
    pub file_size: u64,
    /// Ordered column headers; `None` until backend parsing completes
    pub headers: Option<Vec<String>>,
    /// Row count; `None` until backend parsing completes
    pub row_count: Option<u64>,
    /// Upload timestamp (RFC 3339)
    pub uploaded_at: String,
    /// URL the stored file can be retrieved from
    pub file_url: String,
}

/// A bounded sample of a file's rows as returned by the preview endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePreview {
    /// Sampled rows
    pub data: Vec<Row>,
    /// Ordered column names
    pub columns: Vec<String>,
    /// Total rows in the underlying file
    #[serde(default)]
    pub total_rows: u64,
}

/// A local candidate file, read into memory before upload.
#[derive(Debug, Clone)]
pub struct LocalFile {
    /// File name as it will be reported to the backend
    pub name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a candidate file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has no final file-name component or the
    /// file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                DatamendError::validation(format!("path has no file name: {}", path.display()))
            })?
            .to_string();
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Size of the candidate in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
