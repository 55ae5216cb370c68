// Model artifact loading error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Model artifact error code constants
///
/// Error code range: 3001-3003
pub struct ModelErrorCodes {}

impl ModelErrorCodes {
    /// Artifact file could not be read
    pub const IO: i32 = 3001;

    /// Artifact file is not valid JSON or misses required fields
    pub const PARSE: i32 = 3002;

    /// Artifact internals are inconsistent (columns vs scaler vs importances)
    pub const SCHEMA_MISMATCH: i32 = 3003;
}

/// Log a model error with structured context
pub fn log_model_error(err: &ModelError, context: &str) {
    error!(
        "Model error in {}: code={}, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while loading and validating the persisted model artifact
///
/// These are process-level configuration errors, raised once at startup,
/// never per request. A failed load degrades the process to the
/// model-unavailable state rather than aborting it.
///
/// Error code range: 3001-3003
#[derive(Debug)]
pub enum ModelError {
    /// Artifact file could not be read
    Io { path: String, source: std::io::Error },

    /// Artifact file is not valid JSON or misses required fields
    Parse { reason: String },

    /// Artifact internals are inconsistent: the feature-column list, scaler
    /// vectors, importance vector, and tree node references must all agree.
    SchemaMismatch { reason: String },
}

impl ErrorCode for ModelError {
    fn code(&self) -> i32 {
        match self {
            ModelError::Io { .. } => ModelErrorCodes::IO,
            ModelError::Parse { .. } => ModelErrorCodes::PARSE,
            ModelError::SchemaMismatch { .. } => ModelErrorCodes::SCHEMA_MISMATCH,
        }
    }

    fn message(&self) -> String {
        match self {
            ModelError::Io { path, source } => {
                format!("Failed to read model artifact {}: {}", path, source)
            }
            ModelError::Parse { reason } => format!("Failed to parse model artifact: {}", reason),
            ModelError::SchemaMismatch { reason } => {
                format!("Model artifact is internally inconsistent: {}", reason)
            }
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Parse {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_codes() {
        assert_eq!(
            ModelError::Parse {
                reason: "test".to_string()
            }
            .code(),
            ModelErrorCodes::PARSE
        );
        assert_eq!(
            ModelError::SchemaMismatch {
                reason: "test".to_string()
            }
            .code(),
            ModelErrorCodes::SCHEMA_MISMATCH
        );
    }

    #[test]
    fn test_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let model_err: ModelError = parse_err.into();
        match model_err {
            ModelError::Parse { reason } => assert!(!reason.is_empty()),
            other => panic!("Expected Parse error, got: {:?}", other),
        }
    }
}
