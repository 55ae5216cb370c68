// AppContext: Dependency Injection Container
// Centralizes the loaded model and configuration for testability

use std::path::Path;
use std::sync::Arc;

use crate::analysis;
use crate::api::{AnalysisResponse, HealthStatus, SubjectInfo};
use crate::config::AppConfig;
use crate::error::{log_analysis_error, AnalysisError};
use crate::model::ModelBundle;

/// AppContext: dependency injection container for the analysis service
///
/// Holds the immutable model bundle and the runtime configuration. The
/// model is loaded once at startup and shared read-only across requests,
/// so request handling needs no locks. A missing or invalid model leaves
/// the context in a degraded state: health checks answer, analysis
/// returns `ModelUnavailable`.
pub struct AppContext {
    model: Option<Arc<ModelBundle>>,
    config: AppConfig,
}

impl AppContext {
    /// Create a context from configuration, loading the model artifact.
    ///
    /// Model load failures are logged and tolerated; the context starts
    /// degraded instead of aborting.
    pub fn new(config: AppConfig) -> Self {
        let model = match ModelBundle::load(Path::new(&config.model_path)) {
            Ok(bundle) => {
                log::info!(
                    "[Context] Loaded model from {} ({} trees, {} features)",
                    config.model_path,
                    bundle.forest.trees.len(),
                    bundle.feature_columns.len()
                );
                Some(Arc::new(bundle))
            }
            Err(err) => {
                log::warn!(
                    "[Context] Model unavailable ({}). Starting degraded: analysis disabled, health enabled.",
                    err
                );
                None
            }
        };
        Self { model, config }
    }

    /// Create a context around an already-loaded model.
    pub fn with_model(model: ModelBundle, config: AppConfig) -> Self {
        Self {
            model: Some(Arc::new(model)),
            config,
        }
    }

    /// Create a degraded context with no model.
    pub fn without_model(config: AppConfig) -> Self {
        Self {
            model: None,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Service liveness report; answers whether or not a model is loaded.
    pub fn health(&self) -> HealthStatus {
        HealthStatus::new(self.model_loaded())
    }

    /// Analyze one recording.
    ///
    /// # Arguments
    /// * `samples` - Decoded mono samples
    /// * `sample_rate` - Native sample rate in Hz
    /// * `subject` - Caller metadata, echoed in the response
    ///
    /// # Returns
    /// * `Ok(AnalysisResponse)` - Full analysis result
    /// * `Err(AnalysisError::ModelUnavailable)` - No model loaded; checked
    ///   before any audio work
    /// * `Err(AnalysisError)` - Pipeline failure
    pub fn analyze(
        &self,
        samples: Vec<f32>,
        sample_rate: u32,
        subject: SubjectInfo,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let Some(model) = self.model.as_ref() else {
            let err = AnalysisError::ModelUnavailable;
            log_analysis_error(&err, "analyze");
            return Err(err);
        };

        analysis::analyze(samples, sample_rate, model, subject).map_err(|err| {
            log_analysis_error(&err, "analyze");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_model, sine_wave};

    #[test]
    fn test_degraded_context_rejects_analysis() {
        let ctx = AppContext::without_model(AppConfig::default());
        let err = ctx
            .analyze(sine_wave(22050, 150.0, 22050), 22050, SubjectInfo::default())
            .unwrap_err();
        assert_eq!(err, AnalysisError::ModelUnavailable);
    }

    #[test]
    fn test_degraded_context_still_reports_health() {
        let ctx = AppContext::without_model(AppConfig::default());
        let health = ctx.health();
        assert_eq!(health.status, "ok");
        assert!(!health.model_loaded);
    }

    #[test]
    fn test_loaded_context_reports_model() {
        let ctx = AppContext::with_model(fixture_model(), AppConfig::default());
        assert!(ctx.model_loaded());
        assert!(ctx.health().model_loaded);
    }

    #[test]
    fn test_missing_model_file_degrades_instead_of_failing() {
        let mut config = AppConfig::default();
        config.model_path = "/nonexistent/model.json".to_string();
        let ctx = AppContext::new(config);
        assert!(!ctx.model_loaded());
    }

    #[test]
    fn test_loaded_context_analyzes() {
        let ctx = AppContext::with_model(fixture_model(), AppConfig::default());
        let response = ctx
            .analyze(sine_wave(22050, 150.0, 44100), 22050, SubjectInfo::default())
            .unwrap();
        assert!(response.features.is_finite());
    }
}
