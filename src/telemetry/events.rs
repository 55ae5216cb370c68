//! Structured advisory diagnostic events attached to analysis responses.

use serde::{Deserialize, Serialize};

/// Severity of an advisory diagnostic. Advisory events are never errors:
/// they are logged and attached to the successful result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
}

/// Advisory diagnostics emitted while an analysis request runs.
///
/// Each variant carries enough context for observability without requiring
/// access to the original audio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AnalysisEvent {
    /// A feature value fell outside the training distribution and was
    /// clipped to the acceptable range.
    FeatureClipped {
        feature: String,
        observed: f32,
        lower: f32,
        upper: f32,
    },
    /// Prediction confidence fell below the review threshold.
    LowConfidence { confidence: f32 },
}

impl AnalysisEvent {
    pub fn severity(&self) -> Severity {
        match self {
            AnalysisEvent::FeatureClipped { .. } | AnalysisEvent::LowConfidence { .. } => {
                Severity::Warning
            }
        }
    }
}
