// Response and metadata types exposed to callers

use crate::analysis::features::FeatureVector;
use crate::classify::TopFeature;
use crate::telemetry::AnalysisEvent;
use serde::{Deserialize, Serialize};

/// Subject metadata supplied by the caller.
///
/// Carried through the pipeline untouched and echoed in the response; no
/// field influences extraction or classification. Age and gender stay as
/// free-form strings so the analysis layer never parses or validates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubjectInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
}

/// Complete result of one voice analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    /// 0 = healthy, 1 = Parkinson's indicators present
    pub prediction: u8,
    /// Probability of the predicted class
    pub confidence: f32,
    pub probability_healthy: f32,
    pub probability_parkinsons: f32,
    /// Validated biomarker values that produced the prediction
    pub features: FeatureVector,
    /// Most influential features, highest importance first
    pub top_features: Vec<TopFeature>,
    /// True when the prediction should be reviewed by a human
    pub needs_review: bool,
    /// Advisory diagnostics recorded during this analysis
    pub diagnostics: Vec<AnalysisEvent>,
    /// Caller-supplied subject metadata, echoed verbatim
    pub subject: SubjectInfo,
}

/// Service liveness report.
///
/// Always answerable, model or no model: a missing model degrades
/// analysis, not liveness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn new(model_loaded: bool) -> Self {
        Self {
            status: "ok".to_string(),
            model_loaded,
        }
    }
}
