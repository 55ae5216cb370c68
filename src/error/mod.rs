// Error types for the voice analysis pipeline
//
// This module defines custom error types for per-request analysis failures
// and model artifact loading, providing structured error handling with
// error codes suitable for boundary layers (CLI, HTTP wrappers).

mod analysis;
mod model;

pub use analysis::{log_analysis_error, AnalysisError, AnalysisErrorCodes};
pub use model::{log_model_error, ModelError, ModelErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the request boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
