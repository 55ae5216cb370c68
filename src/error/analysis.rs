// Per-request analysis error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Analysis error code constants
///
/// These constants provide a single source of truth for error codes
/// shared with boundary layers (CLI exit codes, HTTP status mapping).
///
/// Error code range: 2001-2004
pub struct AnalysisErrorCodes {}

impl AnalysisErrorCodes {
    /// Input audio has zero length
    pub const EMPTY_AUDIO: i32 = 2001;

    /// A numerical or decoding failure occurred during feature computation
    pub const FEATURE_EXTRACTION: i32 = 2002;

    /// No trained model is loaded (process-level precondition)
    pub const MODEL_UNAVAILABLE: i32 = 2003;

    /// Extracted features do not match the model's expected columns
    pub const FEATURE_SCHEMA: i32 = 2004;
}

/// Log an analysis error with structured context
///
/// Logs with the numeric error code, the pipeline stage where the error
/// occurred, and the human-readable message. Never panics.
pub fn log_analysis_error(err: &AnalysisError, context: &str) {
    error!(
        "Analysis error in {}: code={}, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Per-request analysis errors
///
/// These errors cover the synchronous analysis call chain: preprocessing,
/// feature extraction, and classification. All are terminal for the single
/// request; none affects shared state or subsequent requests.
///
/// Error code range: 2001-2004
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input audio has zero length
    EmptyAudio,

    /// A numerical or decoding failure occurred during feature computation
    FeatureExtraction { reason: String },

    /// No trained model is loaded. Distinct from per-request errors: the
    /// caller should surface this as a service-unavailable condition.
    ModelUnavailable,

    /// An expected feature column is missing from the extracted vector.
    /// Indicates a corrupted or mismatched model artifact, not bad input.
    FeatureSchema { column: String },
}

impl ErrorCode for AnalysisError {
    fn code(&self) -> i32 {
        match self {
            AnalysisError::EmptyAudio => AnalysisErrorCodes::EMPTY_AUDIO,
            AnalysisError::FeatureExtraction { .. } => AnalysisErrorCodes::FEATURE_EXTRACTION,
            AnalysisError::ModelUnavailable => AnalysisErrorCodes::MODEL_UNAVAILABLE,
            AnalysisError::FeatureSchema { .. } => AnalysisErrorCodes::FEATURE_SCHEMA,
        }
    }

    fn message(&self) -> String {
        match self {
            AnalysisError::EmptyAudio => "Audio input is empty".to_string(),
            AnalysisError::FeatureExtraction { reason } => {
                format!("Feature extraction failed: {}", reason)
            }
            AnalysisError::ModelUnavailable => {
                "No trained model loaded. Provide a model artifact at startup.".to_string()
            }
            AnalysisError::FeatureSchema { column } => {
                format!(
                    "Model expects feature column '{}' which the extractor does not produce",
                    column
                )
            }
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnalysisError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_codes() {
        assert_eq!(AnalysisError::EmptyAudio.code(), AnalysisErrorCodes::EMPTY_AUDIO);
        assert_eq!(
            AnalysisError::FeatureExtraction {
                reason: "test".to_string()
            }
            .code(),
            AnalysisErrorCodes::FEATURE_EXTRACTION
        );
        assert_eq!(
            AnalysisError::ModelUnavailable.code(),
            AnalysisErrorCodes::MODEL_UNAVAILABLE
        );
        assert_eq!(
            AnalysisError::FeatureSchema {
                column: "jitter".to_string()
            }
            .code(),
            AnalysisErrorCodes::FEATURE_SCHEMA
        );
    }

    #[test]
    fn test_analysis_error_messages() {
        let err = AnalysisError::EmptyAudio;
        assert!(err.message().contains("empty"));

        let err = AnalysisError::FeatureExtraction {
            reason: "NaN magnitude".to_string(),
        };
        assert!(err.message().contains("NaN magnitude"));

        let err = AnalysisError::FeatureSchema {
            column: "jitter".to_string(),
        };
        assert!(err.message().contains("jitter"));
    }

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::ModelUnavailable;
        let display = format!("{}", err);
        assert!(display.contains("2003"));
        assert!(display.contains("model"));
    }
}
