//! Modification domain: proposals, previews, applied results, and the
//! confidence policy that gates application.

pub mod confidence;
pub mod model;

pub use confidence::{
    CONFIDENCE_THRESHOLD, ConfidenceCategory, ConfidenceLevel, confidence_level,
    is_confidence_acceptable,
};
pub use model::{
    AppliedModification, ApplyStats, ColumnModification, ModificationInfo, ModificationPreview,
    ModificationProposal, PreviewStats, ProcessedFile, ProcessedFileRecord,
};
