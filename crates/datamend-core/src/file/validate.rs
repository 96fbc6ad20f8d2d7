//! Pre-flight validation for candidate uploads.
//!
//! Pure functions of the file name and size; nothing here touches the
//! network or filesystem. Rejections carry the exact message shown to the
//! user, so no request is ever made for a file the backend would refuse.

use super::model::FileKind;

/// Default upload limit in megabytes (1 GB).
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 1024;

/// Extensions the backend can parse, matched case-insensitively.
const SUPPORTED_EXTENSIONS: [&str; 3] = [".csv", ".xlsx", ".xls"];

/// Outcome of pre-flight validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    Rejected {
        /// User-facing reason, surfaced verbatim
        reason: String,
    },
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted)
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Validation::Accepted => None,
            Validation::Rejected { reason } => Some(reason),
        }
    }
}

/// Whether the file name carries a supported extension.
pub fn is_supported_type(file_name: &str) -> bool {
    let lowered = file_name.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
}

/// Whether the byte size fits within `max_size_mb` megabytes.
///
/// The boundary is inclusive: a file of exactly the limit is accepted.
pub fn is_within_size_limit(file_size: u64, max_size_mb: u64) -> bool {
    file_size <= max_size_mb * 1024 * 1024
}

/// Validates a candidate file before any network call.
///
/// The type check runs first; the size check is only evaluated once the
/// type passes, so an oversized `.txt` still reports the type problem.
pub fn validate_upload(file_name: &str, file_size: u64, max_size_mb: u64) -> Validation {
    if !is_supported_type(file_name) {
        return Validation::Rejected {
            reason: "Please upload a CSV or Excel file".to_string(),
        };
    }
    if !is_within_size_limit(file_size, max_size_mb) {
        return Validation::Rejected {
            reason: format!("File size must be less than {max_size_mb}MB"),
        };
    }
    Validation::Accepted
}

/// Classifies an accepted file name as CSV or Excel.
///
/// Does not itself reject unsupported names; callers must run
/// [`validate_upload`] first. Anything without a `.csv` suffix defaults to
/// Excel.
pub fn classify_kind(file_name: &str) -> FileKind {
    if file_name.to_lowercase().ends_with(".csv") {
        FileKind::Csv
    } else {
        FileKind::Excel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_extensions_case_insensitively() {
        for name in ["data.csv", "data.CSV", "report.xlsx", "old.XLS"] {
            assert!(
                validate_upload(name, 500, DEFAULT_MAX_UPLOAD_MB).is_accepted(),
                "{name} should be accepted"
            );
        }
    }

    #[test]
    fn rejects_unsupported_extension_regardless_of_size() {
        for name in ["data.txt", "archive.zip", "noextension", "data.csv.bak"] {
            let validation = validate_upload(name, 1, DEFAULT_MAX_UPLOAD_MB);
            assert_eq!(
                validation.reason(),
                Some("Please upload a CSV or Excel file"),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn size_boundary_is_inclusive() {
        let limit = 5 * 1024 * 1024;
        assert!(validate_upload("data.csv", limit, 5).is_accepted());

        let validation = validate_upload("data.csv", limit + 1, 5);
        assert_eq!(validation.reason(), Some("File size must be less than 5MB"));
    }

    #[test]
    fn type_check_runs_before_size_check() {
        // An oversized unsupported file reports the type problem.
        let validation = validate_upload("huge.txt", u64::MAX, 5);
        assert_eq!(validation.reason(), Some("Please upload a CSV or Excel file"));
    }

    #[test]
    fn classify_kind_defaults_to_excel() {
        assert_eq!(classify_kind("data.csv"), FileKind::Csv);
        assert_eq!(classify_kind("Data.CSV"), FileKind::Csv);
        assert_eq!(classify_kind("report.xlsx"), FileKind::Excel);
        assert_eq!(classify_kind("old.xls"), FileKind::Excel);
        // classify does not validate; callers run validate_upload first
        assert_eq!(classify_kind("whatever.txt"), FileKind::Excel);
    }
}
