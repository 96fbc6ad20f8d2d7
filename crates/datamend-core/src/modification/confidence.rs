//! Confidence policy for backend-inferred modifications.
//!
//! A proposal is generated and previewed at any confidence, but applying
//! it to the full dataset is gated on [`CONFIDENCE_THRESHOLD`]. The
//! threshold is a business rule with behavioral consequences, so it lives
//! here as one named constant instead of scattered literals.

use serde::{Deserialize, Serialize};

/// Minimum confidence at which a proposal may be applied.
pub const CONFIDENCE_THRESHOLD: f64 = 0.3;

/// Coarse confidence bucket used by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceCategory {
    High,
    Medium,
    Low,
}

impl ConfidenceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceCategory::High => "high",
            ConfidenceCategory::Medium => "medium",
            ConfidenceCategory::Low => "low",
        }
    }
}

/// A bucketed confidence score ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfidenceLevel {
    pub category: ConfidenceCategory,
    /// Rounded percentage form of the raw score
    pub percentage: u32,
    /// Terminal color hint for the rendering layer
    pub style_tag: &'static str,
}

/// Buckets a raw confidence score.
///
/// `high` iff the score exceeds 0.8, `medium` iff it exceeds 0.5, `low`
/// otherwise.
pub fn confidence_level(confidence: f64) -> ConfidenceLevel {
    let percentage = (confidence * 100.0).round() as u32;
    if confidence > 0.8 {
        ConfidenceLevel {
            category: ConfidenceCategory::High,
            percentage,
            style_tag: "green",
        }
    } else if confidence > 0.5 {
        ConfidenceLevel {
            category: ConfidenceCategory::Medium,
            percentage,
            style_tag: "yellow",
        }
    } else {
        ConfidenceLevel {
            category: ConfidenceCategory::Low,
            percentage,
            style_tag: "red",
        }
    }
}

/// Whether a proposal at this confidence may be applied.
pub fn is_confidence_acceptable(confidence: f64) -> bool {
    confidence >= CONFIDENCE_THRESHOLD
}
