// Feature extraction - the acoustic biomarker pipeline
//
// One extractor instance per analysis call. The magnitude spectrogram is
// computed once and shared across the pitch, centroid, cepstral, and HPSS
// stages; the temporal stage works on the raw samples with the same
// framing.

pub mod cepstral;
pub mod fft;
pub mod hpss;
pub mod pitch;
pub mod spectral;
pub mod temporal;
pub mod types;

pub use types::{FeatureVector, FEATURE_COLUMNS};

use crate::audio::AudioBuffer;
use crate::error::AnalysisError;
use fft::FftProcessor;

/// Preferred analysis frame length (samples); shorter signals shrink it
const MAX_FRAME_LENGTH: usize = 2048;

/// Extracts the ten acoustic biomarkers from a preprocessed signal.
pub struct FeatureExtractor {
    frame_length: usize,
    hop_length: usize,
    fft: FftProcessor,
}

impl FeatureExtractor {
    /// Build an extractor sized to the signal.
    ///
    /// Frame length is 2048 samples or the full signal when shorter; hop is
    /// a quarter frame. This guarantees at least one frame for any
    /// non-empty input.
    pub fn for_signal(num_samples: usize) -> Self {
        let frame_length = MAX_FRAME_LENGTH.min(num_samples).max(1);
        let hop_length = (frame_length / 4).max(1);
        Self {
            frame_length,
            hop_length,
            fft: FftProcessor::new(frame_length),
        }
    }

    /// Extract all features from the buffer.
    ///
    /// # Returns
    /// * `Ok(FeatureVector)` - Ten finite feature values
    /// * `Err(AnalysisError::FeatureExtraction)` - A stage produced a
    ///   non-finite value, with the offending columns named
    pub fn extract(&self, buffer: &AudioBuffer) -> Result<FeatureVector, AnalysisError> {
        let samples = &buffer.samples;
        let sample_rate = buffer.sample_rate;

        let spectrogram = self.fft.spectrogram(samples, self.hop_length);

        let track = pitch::pitch_track(&spectrogram, sample_rate, self.frame_length);
        let pitch = pitch::pitch_features(&track);

        let mfcc = cepstral::mfcc_summary(&spectrogram, sample_rate, self.frame_length);

        let features = FeatureVector {
            jitter: pitch.jitter,
            shimmer: temporal::shimmer(samples, self.frame_length, self.hop_length),
            hnr: hpss::harmonic_noise_ratio(&spectrogram),
            mfcc_mean: mfcc.mfcc_mean,
            mfcc_std: mfcc.mfcc_std,
            pitch_mean: pitch.pitch_mean,
            pitch_std: pitch.pitch_std,
            energy_mean: temporal::energy_mean(samples, self.frame_length, self.hop_length),
            spectral_centroid: spectral::spectral_centroid_mean(
                &spectrogram,
                sample_rate,
                self.frame_length,
            ),
            zero_crossing_rate: temporal::zero_crossing_rate(
                samples,
                self.frame_length,
                self.hop_length,
            ),
        };

        if !features.is_finite() {
            let bad: Vec<&str> = FEATURE_COLUMNS
                .iter()
                .copied()
                .filter(|name| !features.get(name).unwrap_or(0.0).is_finite())
                .collect();
            return Err(AnalysisError::FeatureExtraction {
                reason: format!("non-finite feature values: {}", bad.join(", ")),
            });
        }

        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Preprocessor;
    use crate::testing::{noise, sine_wave};

    fn extract(samples: Vec<f32>, sample_rate: u32) -> FeatureVector {
        let buffer = Preprocessor::preprocess(samples, sample_rate).unwrap();
        FeatureExtractor::for_signal(buffer.samples.len())
            .extract(&buffer)
            .unwrap()
    }

    #[test]
    fn test_sine_features_are_plausible() {
        let sample_rate = 22050;
        let features = extract(sine_wave(sample_rate, 150.0, sample_rate as usize * 2), sample_rate);

        assert!(features.is_finite());
        assert!(
            (features.pitch_mean - 150.0).abs() <= 15.0,
            "pitch_mean {}",
            features.pitch_mean
        );
        assert!(features.jitter < 0.01, "jitter {}", features.jitter);
        assert!(features.shimmer < 0.05, "shimmer {}", features.shimmer);
        assert!(features.hnr > 10.0, "hnr {}", features.hnr);
        assert!(features.energy_mean > 0.0);
    }

    #[test]
    fn test_noise_features_are_finite() {
        let features = extract(noise(44100, 42), 22050);
        assert!(features.is_finite());
        assert!(features.zero_crossing_rate > 0.1);
    }

    #[test]
    fn test_silence_falls_back_to_defaults() {
        let features = extract(vec![0.0f32; 44100], 22050);
        assert!(features.is_finite());
        assert_eq!(features.pitch_mean, 150.0);
        assert_eq!(features.pitch_std, 40.0);
        assert_eq!(features.jitter, 0.005);
        assert_eq!(features.shimmer, 0.02);
        assert_eq!(features.energy_mean, 0.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let sample_rate = 22050;
        let samples = sine_wave(sample_rate, 220.0, 33075);
        let first = extract(samples.clone(), sample_rate);
        let second = extract(samples, sample_rate);
        // Bit-identical: same input, same output, no hidden state.
        assert_eq!(first.to_array(), second.to_array());
    }

    #[test]
    fn test_nan_sample_rejected_not_panicking() {
        // A NaN in the middle of the recording survives normalization and
        // trimming; extraction must answer with an error, never unwind.
        let sample_rate = 22050;
        let mut samples: Vec<f32> = sine_wave(sample_rate, 150.0, sample_rate as usize)
            .into_iter()
            .map(|s| s * 0.1)
            .collect();
        samples[11025] = f32::NAN;

        let buffer = Preprocessor::preprocess(samples, sample_rate).unwrap();
        let err = FeatureExtractor::for_signal(buffer.samples.len())
            .extract(&buffer)
            .unwrap_err();
        match err {
            AnalysisError::FeatureExtraction { reason } => {
                assert!(reason.contains("non-finite"), "reason: {}", reason);
            }
            other => panic!("Expected FeatureExtraction, got: {:?}", other),
        }
    }

    #[test]
    fn test_very_short_signal_still_extracts() {
        // 600 samples is under one full-size frame; the extractor shrinks
        // the frame to fit.
        let features = extract(sine_wave(22050, 200.0, 600), 22050);
        assert!(features.is_finite());
    }
}
