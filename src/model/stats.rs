// Training-distribution statistics carried in the model artifact

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-feature statistics observed over the training set.
///
/// Only the min/max maps drive validation; means and standard deviations
/// are carried for reporting when the training pipeline exports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureStats {
    #[serde(default)]
    pub mins: HashMap<String, f32>,
    #[serde(default)]
    pub maxs: HashMap<String, f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub means: Option<HashMap<String, f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stds: Option<HashMap<String, f32>>,
}

impl FeatureStats {
    /// True when no feature has both a recorded min and max.
    pub fn is_empty(&self) -> bool {
        self.mins.is_empty() || self.maxs.is_empty()
    }

    /// The training range for a feature, when both bounds exist.
    pub fn range(&self, feature: &str) -> Option<(f32, f32)> {
        Some((*self.mins.get(feature)?, *self.maxs.get(feature)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = FeatureStats::default();
        assert!(stats.is_empty());
        assert_eq!(stats.range("jitter"), None);
    }

    #[test]
    fn test_range_lookup() {
        let mut stats = FeatureStats::default();
        stats.mins.insert("jitter".to_string(), 0.001);
        stats.maxs.insert("jitter".to_string(), 0.025);
        assert!(!stats.is_empty());
        assert_eq!(stats.range("jitter"), Some((0.001, 0.025)));
        assert_eq!(stats.range("shimmer"), None);
    }

    #[test]
    fn test_optional_fields_deserialize_when_absent() {
        let stats: FeatureStats =
            serde_json::from_str(r#"{"mins": {"hnr": 4.0}, "maxs": {"hnr": 35.0}}"#).unwrap();
        assert_eq!(stats.means, None);
        assert_eq!(stats.stds, None);
        assert_eq!(stats.range("hnr"), Some((4.0, 35.0)));
    }
}
