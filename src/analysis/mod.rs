// Analysis module - the end-to-end pipeline
//
// Chains the per-request stages in order: preprocess, extract, validate,
// classify, assemble. Each stage is pure with respect to the request; the
// only shared input is the immutable model bundle.

pub mod features;

use crate::api::{AnalysisResponse, SubjectInfo};
use crate::audio::Preprocessor;
use crate::classify::ClassifierAdapter;
use crate::error::AnalysisError;
use crate::model::ModelBundle;
use crate::telemetry::DiagnosticSink;
use crate::validation::FeatureValidator;
use features::FeatureExtractor;

/// Run one recording through the full pipeline.
///
/// # Arguments
/// * `samples` - Decoded mono samples
/// * `sample_rate` - Native sample rate in Hz
/// * `model` - Loaded model bundle
/// * `subject` - Caller metadata, echoed in the response
///
/// # Returns
/// * `Ok(AnalysisResponse)` - Prediction plus features and diagnostics
/// * `Err(AnalysisError)` - Empty input, failed extraction, or a schema
///   mismatch between extractor and model
pub fn analyze(
    samples: Vec<f32>,
    sample_rate: u32,
    model: &ModelBundle,
    subject: SubjectInfo,
) -> Result<AnalysisResponse, AnalysisError> {
    let mut sink = DiagnosticSink::new();

    let buffer = Preprocessor::preprocess(samples, sample_rate)?;
    tracing::debug!(
        "[Pipeline] Preprocessed signal: {:.2} s at {} Hz",
        buffer.duration_secs(),
        buffer.sample_rate
    );

    let extractor = FeatureExtractor::for_signal(buffer.samples.len());
    let features = extractor.extract(&buffer)?;

    let validated = FeatureValidator::validate(features, &model.feature_stats, &mut sink);

    let prediction = ClassifierAdapter::classify(&validated, model, &mut sink)?;
    tracing::info!(
        "[Pipeline] Prediction {} at {:.1}% confidence ({} diagnostics)",
        prediction.prediction,
        prediction.confidence * 100.0,
        sink.len()
    );

    Ok(AnalysisResponse {
        prediction: prediction.prediction,
        confidence: prediction.confidence,
        probability_healthy: prediction.probability_healthy,
        probability_parkinsons: prediction.probability_parkinsons,
        features: validated,
        top_features: prediction.top_features,
        needs_review: prediction.needs_review,
        diagnostics: sink.into_events(),
        subject,
    })
}
