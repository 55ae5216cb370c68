//! Shared test support: deterministic signal generators and fixture models.
//!
//! Used by unit tests and the integration suite alike, so it is compiled
//! into the crate rather than gated behind `cfg(test)`. Everything here is
//! deterministic; analysis results over these inputs are reproducible
//! bit for bit.

use crate::analysis::features::{FeatureVector, FEATURE_COLUMNS};
use crate::model::{DecisionTree, FeatureStats, ModelBundle, RandomForest, StandardScaler, TreeNode};

/// Generate a unit-amplitude sine wave.
pub fn sine_wave(sample_rate: u32, frequency: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin()
        })
        .collect()
}

/// Deterministic pseudo-random noise in [-1, 1].
///
/// A fixed linear congruential generator rather than a seeded RNG crate:
/// identical across platforms and runs, which the idempotence tests rely
/// on.
pub fn noise(num_samples: usize, seed: u64) -> Vec<f32> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..num_samples)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            // Top 24 bits give a uniform value in [0, 1).
            let uniform = (state >> 40) as f32 / (1u64 << 24) as f32;
            uniform * 2.0 - 1.0
        })
        .collect()
}

/// A feature vector well inside the fixture model's training ranges, with
/// healthy values for all three decision features.
pub fn healthy_features() -> FeatureVector {
    FeatureVector {
        jitter: 0.004,
        shimmer: 0.03,
        hnr: 22.0,
        mfcc_mean: -100.0,
        mfcc_std: 50.0,
        pitch_mean: 150.0,
        pitch_std: 40.0,
        energy_mean: 0.05,
        spectral_centroid: 1800.0,
        zero_crossing_rate: 0.08,
    }
}

fn fixture_stats() -> FeatureStats {
    let mut stats = FeatureStats::default();
    let ranges: [(&str, f32, f32); 10] = [
        ("jitter", 0.001, 0.025),
        ("shimmer", 0.01, 0.08),
        ("hnr", 8.0, 35.0),
        ("mfcc_mean", -300.0, -50.0),
        ("mfcc_std", 20.0, 90.0),
        ("pitch_mean", 100.0, 220.0),
        ("pitch_std", 10.0, 80.0),
        ("energy_mean", 0.01, 0.2),
        ("spectral_centroid", 800.0, 3000.0),
        ("zero_crossing_rate", 0.02, 0.15),
    ];
    for (name, min, max) in ranges {
        stats.mins.insert(name.to_string(), min);
        stats.maxs.insert(name.to_string(), max);
    }
    stats
}

/// Decision stump: class 0 when `feature <= threshold`, class 1 otherwise.
fn stump(feature: usize, threshold: f32) -> DecisionTree {
    DecisionTree {
        nodes: vec![
            TreeNode::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf {
                class_weights: [10.0, 0.0],
            },
            TreeNode::Leaf {
                class_weights: [0.0, 10.0],
            },
        ],
    }
}

/// Decision stump with the class assignment inverted: class 1 below the
/// threshold, class 0 above.
fn inverted_stump(feature: usize, threshold: f32) -> DecisionTree {
    DecisionTree {
        nodes: vec![
            TreeNode::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf {
                class_weights: [0.0, 10.0],
            },
            TreeNode::Leaf {
                class_weights: [10.0, 0.0],
            },
        ],
    }
}

/// A small hand-built model bundle with clinically sensible split points.
///
/// Identity scaler so raw feature values drive the trees directly: high
/// jitter, high shimmer, or low HNR each vote for class 1. Importances
/// sum to 1 with jitter ranked first.
pub fn fixture_model() -> ModelBundle {
    ModelBundle {
        forest: RandomForest {
            trees: vec![
                stump(0, 0.006),           // jitter
                stump(1, 0.0375),          // shimmer
                inverted_stump(2, 20.0),   // hnr: low values are the indicator
            ],
            feature_importances: vec![
                0.28, // jitter
                0.22, // shimmer
                0.18, // hnr
                0.04, // mfcc_mean
                0.05, // mfcc_std
                0.06, // pitch_mean
                0.08, // pitch_std
                0.04, // energy_mean
                0.03, // spectral_centroid
                0.02, // zero_crossing_rate
            ],
        },
        scaler: StandardScaler {
            means: vec![0.0; 10],
            scales: vec![1.0; 10],
        },
        feature_columns: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
        feature_stats: fixture_stats(),
    }
}

/// A variant whose single leaf always answers 55/45, so every prediction
/// lands below the review threshold.
pub fn low_confidence_model() -> ModelBundle {
    let mut bundle = fixture_model();
    bundle.forest.trees = vec![DecisionTree {
        nodes: vec![TreeNode::Leaf {
            class_weights: [0.55, 0.45],
        }],
    }];
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave_amplitude_and_length() {
        let signal = sine_wave(22050, 150.0, 4410);
        assert_eq!(signal.len(), 4410);
        let peak = signal.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        assert!(peak <= 1.0 && peak > 0.9);
    }

    #[test]
    fn test_noise_is_deterministic() {
        assert_eq!(noise(1000, 42), noise(1000, 42));
        assert_ne!(noise(1000, 42), noise(1000, 43));
    }

    #[test]
    fn test_noise_stays_in_range() {
        assert!(noise(10000, 7).iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_fixture_importances_sum_to_one() {
        let total: f32 = fixture_model().forest.feature_importances.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_healthy_features_within_fixture_ranges() {
        let stats = fixture_model().feature_stats;
        let features = healthy_features();
        for name in FEATURE_COLUMNS {
            let (min, max) = stats.range(name).unwrap();
            let value = features.get(name).unwrap();
            assert!(
                value >= 0.5 * min && value <= 1.5 * max,
                "{} = {} outside [{}, {}]",
                name,
                value,
                0.5 * min,
                1.5 * max
            );
        }
    }
}
