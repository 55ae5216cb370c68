//! Public request/response surface of the analysis core.
//!
//! Transport layers (HTTP handlers, CLI) construct `SubjectInfo` and
//! consume `AnalysisResponse`/`HealthStatus`; nothing in here depends on
//! any particular transport.

pub mod types;

pub use types::{AnalysisResponse, HealthStatus, SubjectInfo};
