// Validation module - plausibility clipping against training statistics
//
// Features outside 50%-150% of the training range are pulled back to the
// boundary and reported as advisory diagnostics. Validation never fails a
// request: a clipped vector still flows to the classifier.

use crate::analysis::features::{FeatureVector, FEATURE_COLUMNS};
use crate::model::FeatureStats;
use crate::telemetry::{AnalysisEvent, DiagnosticSink};

/// Lower clip bound as a multiple of the training minimum
const RANGE_LOWER_FACTOR: f32 = 0.5;

/// Upper clip bound as a multiple of the training maximum
const RANGE_UPPER_FACTOR: f32 = 1.5;

/// Clips implausible feature values to the training distribution.
pub struct FeatureValidator;

impl FeatureValidator {
    /// Clip each feature to [0.5 * train_min, 1.5 * train_max].
    ///
    /// Features without recorded statistics pass through unchanged, as does
    /// the whole vector when the statistics table is empty. One diagnostic
    /// is recorded per clipped feature, so the diagnostic count doubles as
    /// the clip count.
    pub fn validate(
        features: FeatureVector,
        stats: &FeatureStats,
        sink: &mut DiagnosticSink,
    ) -> FeatureVector {
        if stats.is_empty() {
            return features;
        }

        let mut validated = features;
        for name in FEATURE_COLUMNS {
            let Some((train_min, train_max)) = stats.range(name) else {
                continue;
            };
            let lower = RANGE_LOWER_FACTOR * train_min;
            let upper = RANGE_UPPER_FACTOR * train_max;

            let observed = validated.get(name).unwrap_or(0.0);
            // Lower bound wins when the bounds cross (negative-valued
            // features can produce lower > upper).
            let clipped = observed.max(lower).min(upper);
            if clipped != observed {
                sink.record(AnalysisEvent::FeatureClipped {
                    feature: name.to_string(),
                    observed,
                    lower,
                    upper,
                });
                validated.set(name, clipped);
            }
        }
        validated
    }
}
