// Classification adapter - from validated features to a prediction
//
// Bridges the fixed-field feature vector and the model artifact: projects
// features into the artifact's column order, standardizes, queries the
// forest, and derives the confidence, review flag, and top contributing
// features.

use crate::analysis::features::FeatureVector;
use crate::error::AnalysisError;
use crate::model::ModelBundle;
use crate::telemetry::{AnalysisEvent, DiagnosticSink};
use serde::{Deserialize, Serialize};

/// Predictions with confidence below this are flagged for human review
pub const REVIEW_THRESHOLD: f32 = 0.6;

/// Number of features reported in the importance ranking
const TOP_FEATURES: usize = 5;

/// One entry of the feature-importance ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopFeature {
    pub name: String,
    /// Global importance fitted at training time
    pub importance: f32,
    /// The validated (pre-scaling) value this recording produced
    pub value: f32,
}

/// Outcome of one classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// 0 = healthy, 1 = Parkinson's indicators present
    pub prediction: u8,
    /// Probability of the predicted class
    pub confidence: f32,
    pub probability_healthy: f32,
    pub probability_parkinsons: f32,
    /// The most influential features, highest importance first
    pub top_features: Vec<TopFeature>,
    /// True when confidence is below the review threshold
    pub needs_review: bool,
}

/// Runs a validated feature vector through a loaded model.
pub struct ClassifierAdapter;

impl ClassifierAdapter {
    /// Classify one validated feature vector.
    ///
    /// # Arguments
    /// * `features` - Validated biomarkers
    /// * `model` - Loaded and schema-checked model bundle
    /// * `sink` - Per-request diagnostic sink
    ///
    /// # Returns
    /// * `Ok(PredictionResult)` - Label, probabilities, ranking, review flag
    /// * `Err(AnalysisError::FeatureSchema)` - The artifact names a column
    ///   the extractor does not produce (load-time validation makes this
    ///   unreachable for bundles built through `ModelBundle`)
    pub fn classify(
        features: &FeatureVector,
        model: &ModelBundle,
        sink: &mut DiagnosticSink,
    ) -> Result<PredictionResult, AnalysisError> {
        // Project into the artifact's column order.
        let mut row = Vec::with_capacity(model.feature_columns.len());
        for column in &model.feature_columns {
            let value = features
                .get(column)
                .ok_or_else(|| AnalysisError::FeatureSchema {
                    column: column.clone(),
                })?;
            row.push(value);
        }

        model.scaler.transform(&mut row);
        let proba = model.forest.predict_proba(&row);
        let prediction = model.forest.predict(&row);
        let confidence = proba[prediction as usize];

        let needs_review = confidence < REVIEW_THRESHOLD;
        if needs_review {
            sink.record(AnalysisEvent::LowConfidence { confidence });
        }

        Ok(PredictionResult {
            prediction,
            confidence,
            probability_healthy: proba[0],
            probability_parkinsons: proba[1],
            top_features: Self::rank_features(features, model),
            needs_review,
        })
    }

    /// The five most important features by the model's global importances,
    /// sorted descending. Ties keep the artifact's column order (stable
    /// sort), so the ranking is deterministic.
    fn rank_features(features: &FeatureVector, model: &ModelBundle) -> Vec<TopFeature> {
        let mut ranked: Vec<TopFeature> = model
            .feature_columns
            .iter()
            .zip(model.forest.feature_importances.iter())
            .map(|(name, &importance)| TopFeature {
                name: name.clone(),
                importance,
                value: features.get(name).unwrap_or(0.0),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(TOP_FEATURES);
        ranked
    }
}
