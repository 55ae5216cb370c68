// Types module - the acoustic biomarker vector
//
// The fixed-field record replaces a dynamic name→value map: every feature
// the model can ask for exists at compile time, so a missing or extra key
// can never reach the classifier at runtime.

use serde::{Deserialize, Serialize};

/// Canonical feature-column order shared by the extractor, the validator's
/// statistics table, and the trained model artifact.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "jitter",
    "shimmer",
    "hnr",
    "mfcc_mean",
    "mfcc_std",
    "pitch_mean",
    "pitch_std",
    "energy_mean",
    "spectral_centroid",
    "zero_crossing_rate",
];

/// Acoustic biomarkers extracted from one voice recording
///
/// Produced once by the extractor, clipped (never re-keyed) by the
/// validator, and read by the classifier adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Cycle-to-cycle pitch-period variability (dimensionless ratio)
    pub jitter: f32,

    /// Cycle-to-cycle energy variability (dimensionless ratio)
    pub shimmer: f32,

    /// Harmonic-to-noise ratio in dB
    pub hnr: f32,

    /// Mean over all MFCC coefficients and frames (single scalar)
    pub mfcc_mean: f32,

    /// Standard deviation over all MFCC coefficients and frames
    pub mfcc_std: f32,

    /// Mean fundamental frequency over voiced frames (Hz)
    pub pitch_mean: f32,

    /// Standard deviation of fundamental frequency over voiced frames (Hz)
    pub pitch_std: f32,

    /// Mean per-frame RMS energy (linear amplitude)
    pub energy_mean: f32,

    /// Mean per-frame spectral centroid (Hz)
    pub spectral_centroid: f32,

    /// Mean per-frame zero-crossing rate (0.0 to 1.0)
    pub zero_crossing_rate: f32,
}

impl FeatureVector {
    /// Values in canonical column order.
    pub fn to_array(self) -> [f32; 10] {
        [
            self.jitter,
            self.shimmer,
            self.hnr,
            self.mfcc_mean,
            self.mfcc_std,
            self.pitch_mean,
            self.pitch_std,
            self.energy_mean,
            self.spectral_centroid,
            self.zero_crossing_rate,
        ]
    }

    /// Look up a feature by its column name.
    pub fn get(&self, name: &str) -> Option<f32> {
        match name {
            "jitter" => Some(self.jitter),
            "shimmer" => Some(self.shimmer),
            "hnr" => Some(self.hnr),
            "mfcc_mean" => Some(self.mfcc_mean),
            "mfcc_std" => Some(self.mfcc_std),
            "pitch_mean" => Some(self.pitch_mean),
            "pitch_std" => Some(self.pitch_std),
            "energy_mean" => Some(self.energy_mean),
            "spectral_centroid" => Some(self.spectral_centroid),
            "zero_crossing_rate" => Some(self.zero_crossing_rate),
            _ => None,
        }
    }

    /// Set a feature by its column name. Returns false for unknown names.
    pub fn set(&mut self, name: &str, value: f32) -> bool {
        match name {
            "jitter" => self.jitter = value,
            "shimmer" => self.shimmer = value,
            "hnr" => self.hnr = value,
            "mfcc_mean" => self.mfcc_mean = value,
            "mfcc_std" => self.mfcc_std = value,
            "pitch_mean" => self.pitch_mean = value,
            "pitch_std" => self.pitch_std = value,
            "energy_mean" => self.energy_mean = value,
            "spectral_centroid" => self.spectral_centroid = value,
            "zero_crossing_rate" => self.zero_crossing_rate = value,
            _ => return false,
        }
        true
    }

    /// True when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}
