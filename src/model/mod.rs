// Model module - the trained artifact and its load-time validation
//
// The artifact is one JSON document produced by the training pipeline:
// forest, scaler, ordered feature columns, and training statistics.
// Schema problems are configuration errors surfaced once at load time,
// never per request.

pub mod forest;
pub mod scaler;
pub mod stats;

pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use scaler::StandardScaler;
pub use stats::FeatureStats;

use crate::analysis::features::FeatureVector;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the classifier needs, loaded and validated as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelBundle {
    pub forest: RandomForest,
    pub scaler: StandardScaler,
    /// Feature order the forest and scaler were fitted on
    pub feature_columns: Vec<String>,
    #[serde(default)]
    pub feature_stats: FeatureStats,
}

impl ModelBundle {
    /// Load and validate a model artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a model artifact from its JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let bundle: ModelBundle = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Internal consistency checks, run once after parsing.
    ///
    /// The forest, scaler, and column list must agree on dimensionality,
    /// every column must name a known feature, and every tree link must be
    /// in bounds. Violations are fatal: a half-valid model must never
    /// answer requests.
    fn validate(&self) -> Result<(), ModelError> {
        let n = self.feature_columns.len();
        if n == 0 {
            return Err(ModelError::SchemaMismatch {
                reason: "feature_columns is empty".to_string(),
            });
        }
        if self.forest.trees.is_empty() {
            return Err(ModelError::SchemaMismatch {
                reason: "forest has no trees".to_string(),
            });
        }
        if self.scaler.means.len() != n || self.scaler.scales.len() != n {
            return Err(ModelError::SchemaMismatch {
                reason: format!(
                    "scaler dimensions ({} means, {} scales) do not match {} feature columns",
                    self.scaler.means.len(),
                    self.scaler.scales.len(),
                    n
                ),
            });
        }
        if self.forest.feature_importances.len() != n {
            return Err(ModelError::SchemaMismatch {
                reason: format!(
                    "{} feature importances do not match {} feature columns",
                    self.forest.feature_importances.len(),
                    n
                ),
            });
        }

        let probe = FeatureVector {
            jitter: 0.0,
            shimmer: 0.0,
            hnr: 0.0,
            mfcc_mean: 0.0,
            mfcc_std: 0.0,
            pitch_mean: 0.0,
            pitch_std: 0.0,
            energy_mean: 0.0,
            spectral_centroid: 0.0,
            zero_crossing_rate: 0.0,
        };
        for column in &self.feature_columns {
            if probe.get(column).is_none() {
                return Err(ModelError::SchemaMismatch {
                    reason: format!("unknown feature column '{}'", column),
                });
            }
        }

        for (i, tree) in self.forest.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::SchemaMismatch {
                    reason: format!("tree {} has no nodes", i),
                });
            }
            if !tree.links_in_bounds() {
                return Err(ModelError::SchemaMismatch {
                    reason: format!("tree {} has out-of-bounds child links", i),
                });
            }
            if let Some(max_feature) = tree.max_feature_index() {
                if max_feature >= n {
                    return Err(ModelError::SchemaMismatch {
                        reason: format!(
                            "tree {} splits on feature index {} but only {} columns exist",
                            i, max_feature, n
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}
