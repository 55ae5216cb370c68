//! Runtime configuration loading
//!
//! Configuration is read from a JSON file so deployment parameters can be
//! adjusted without recompilation. A missing or malformed file falls back
//! to defaults with a warning; a bad config file must never stop the
//! service from answering its health probe.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Filesystem path to the trained model artifact
    pub model_path: String,
    pub audio: AudioConfig,
}

/// Audio intake parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Maximum accepted recording length in seconds; the transport layer
    /// rejects longer recordings before analysis starts
    pub max_duration_secs: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: 30.0,
        }
    }
}

impl Default for AppConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            model_path: "assets/model.json".to_string(),
            audio: AudioConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or defaults when the file is missing or
    /// malformed.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model_path, "assets/model.json");
        assert_eq!(config.audio.max_duration_secs, 30.0);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("/nonexistent/config.json");
        assert_eq!(config.model_path, AppConfig::default().model_path);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.model_path, config.model_path);
        assert_eq!(
            parsed.audio.max_duration_secs,
            config.audio.max_duration_secs
        );
    }
}
