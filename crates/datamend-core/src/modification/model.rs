use serde::{Deserialize, Serialize};

use crate::file::Row;

/// A backend-inferred, pattern-based edit to one column.
///
/// Echoed back verbatim to the apply endpoint, so the backend commits
/// exactly what was previewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnModification {
    /// Target column name
    pub column_name: String,
    /// Regex the backend will apply
    pub regex_pattern: String,
    /// Replacement string
    pub replacement: String,
    /// Natural-language description of the edit
    pub description: String,
    /// Backend certainty that the edit matches user intent, in [0,1]
    pub confidence: f64,
}

/// Summary statistics for a previewed modification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewStats {
    /// Rows considered
    pub total_rows: u64,
    /// Rows that would change
    pub modified_rows: u64,
    /// modified_rows / total_rows when total_rows > 0, in [0,1]
    pub modification_rate: f64,
    /// Echo of the applied pattern
    #[serde(default)]
    pub pattern: String,
    /// Echo of the replacement
    #[serde(default)]
    pub replacement: String,
    /// Backend-reported domain error (e.g. the regex failed to compile).
    /// Arrives inside a successful response and must be rendered, not
    /// raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A bounded sample of rows showing the effect of a proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModificationPreview {
    /// Sampled rows with the modification applied
    pub data: Vec<Row>,
    /// Summary statistics over the sample window
    pub stats: PreviewStats,
    /// Ordered column names
    pub columns: Vec<String>,
}

/// A not-yet-applied candidate edit with its bound preview.
///
/// Created by a successful modify call; discarded on cancel, reset, a new
/// instruction, or after being applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModificationProposal {
    pub modification: ColumnModification,
    pub preview: ModificationPreview,
}

/// The processed file produced by committing a proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub id: i64,
    pub name: String,
    pub file_url: String,
}

/// Row counts reported by the apply endpoint for the full dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApplyStats {
    pub total_rows: u64,
    pub modified_rows: u64,
}

/// Response of the apply endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedModification {
    pub processed_file: ProcessedFile,
    pub stats: ApplyStats,
}

/// The part of a committed modification kept for the audit trail: the
/// column and the description, not the full pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModificationInfo {
    pub column_name: String,
    pub description: String,
}

/// An audit entry for a modification committed to the full dataset.
///
/// Records are append-only, newest first, and never mutated or removed
/// during the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedFileRecord {
    pub id: i64,
    pub name: String,
    pub file_url: String,
    /// Client-side creation timestamp (RFC 3339)
    pub created_at: String,
    pub stats: ApplyStats,
    pub modification: ModificationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_decodes_from_modify_response() {
        let raw = r#"{
            "modification": {
                "column_name": "Email",
                "regex_pattern": "[a-z]+@[a-z]+\\.com",
                "replacement": "REDACTED",
                "description": "Redact email addresses",
                "confidence": 0.92
            },
            "preview": {
                "data": [{"Email": "REDACTED", "Name": "Ada"}],
                "stats": {
                    "total_rows": 10,
                    "modified_rows": 4,
                    "modification_rate": 0.4,
                    "pattern": "[a-z]+@[a-z]+\\.com",
                    "replacement": "REDACTED"
                },
                "columns": ["Email", "Name"]
            }
        }"#;
        let proposal: ModificationProposal = serde_json::from_str(raw).unwrap();
        assert_eq!(proposal.modification.column_name, "Email");
        assert_eq!(proposal.preview.stats.modified_rows, 4);
        assert!(proposal.preview.stats.error.is_none());
    }

    #[test]
    fn preview_stats_carry_domain_error_without_failing() {
        let raw = r#"{
            "total_rows": 10,
            "modified_rows": 0,
            "modification_rate": 0.0,
            "error": "regex failed to compile"
        }"#;
        let stats: PreviewStats = serde_json::from_str(raw).unwrap();
        assert_eq!(stats.error.as_deref(), Some("regex failed to compile"));
        assert_eq!(stats.pattern, "");
    }
}
