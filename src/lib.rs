// NeuroVoice Core - Acoustic Biomarker Analysis Engine
// Voice feature extraction and Parkinson's indicator classification

// Module declarations
pub mod analysis;
pub mod api;
pub mod audio;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod telemetry;
pub mod testing;
pub mod validation;

// Re-exports for convenience
pub use api::{AnalysisResponse, HealthStatus, SubjectInfo};
pub use context::AppContext;
