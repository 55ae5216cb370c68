// Audio module - input buffer type and signal preprocessing
//
// Preprocessing runs once per analysis call, before feature extraction:
// 1. Peak-normalize amplitude to a fixed reference scale (|x|max = 1.0)
// 2. Trim leading/trailing frames more than 20 dB below the peak frame RMS
// 3. Guard: if trimming leaves less than 0.5 s, keep the untrimmed signal
//
// The preprocessor owns the buffer for the duration of the call and has no
// side effects beyond returning the cleaned buffer.

use crate::error::AnalysisError;

/// Frame length used for silence trimming (samples)
const TRIM_FRAME_LENGTH: usize = 2048;

/// Hop length used for silence trimming (samples)
const TRIM_HOP_LENGTH: usize = 512;

/// Silence threshold relative to the peak frame RMS (dB)
const SILENCE_THRESHOLD_DB: f32 = 20.0;

/// Minimum duration the trimmed signal must keep (seconds)
const MIN_TRIMMED_SECS: f32 = 0.5;

/// A mono audio signal plus its sample rate.
///
/// Immutable once produced by the preprocessor; scoped to a single
/// analysis call and never persisted.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Signal duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Signal preprocessor: amplitude normalization and silence trimming.
pub struct Preprocessor;

impl Preprocessor {
    /// Clean a raw decoded signal for feature extraction.
    ///
    /// # Arguments
    /// * `samples` - Decoded mono (or already down-mixed) sample sequence
    /// * `sample_rate` - Native sample rate in Hz
    ///
    /// # Returns
    /// * `Ok(AudioBuffer)` - Normalized, silence-trimmed signal
    /// * `Err(AnalysisError::EmptyAudio)` - Zero-length input
    pub fn preprocess(samples: Vec<f32>, sample_rate: u32) -> Result<AudioBuffer, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptyAudio);
        }

        let normalized = Self::normalize_peak(samples);
        let min_samples = (MIN_TRIMMED_SECS * sample_rate as f32) as usize;

        let trimmed = Self::trim_silence(&normalized);
        let samples = if trimmed.len() < min_samples {
            // A very short but valid recording would be destroyed by the
            // trim; fall back to the normalized, untrimmed signal.
            tracing::debug!(
                "[Preprocessor] Trimmed signal too short ({} < {} samples), keeping untrimmed",
                trimmed.len(),
                min_samples
            );
            normalized
        } else {
            trimmed
        };

        Ok(AudioBuffer::new(samples, sample_rate))
    }

    /// Scale the signal so the largest absolute sample is 1.0.
    ///
    /// An all-zero signal is returned unchanged; downstream stages fall
    /// back to their documented silence defaults.
    fn normalize_peak(mut samples: Vec<f32>) -> Vec<f32> {
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        if peak > 0.0 {
            let gain = 1.0 / peak;
            for sample in samples.iter_mut() {
                *sample *= gain;
            }
        }
        samples
    }

    /// Remove leading/trailing segments whose frame RMS is more than
    /// `SILENCE_THRESHOLD_DB` below the peak frame RMS.
    ///
    /// Returns an empty vector when every frame is below the threshold
    /// (all-silence input); the caller's minimum-duration guard then keeps
    /// the untrimmed signal.
    fn trim_silence(samples: &[f32]) -> Vec<f32> {
        let frame_length = TRIM_FRAME_LENGTH.min(samples.len());
        if frame_length == 0 {
            return Vec::new();
        }
        let hop_length = TRIM_HOP_LENGTH.min(frame_length).max(1);

        let rms: Vec<f32> = frame_rms(samples, frame_length, hop_length);
        let peak_rms = rms.iter().copied().fold(0.0f32, f32::max);
        if peak_rms <= 0.0 {
            return Vec::new();
        }

        // -20 dB relative to the peak frame RMS, in linear amplitude.
        let threshold = peak_rms * 10f32.powf(-SILENCE_THRESHOLD_DB / 20.0);

        let first = rms.iter().position(|&r| r > threshold);
        let last = rms.iter().rposition(|&r| r > threshold);

        match (first, last) {
            (Some(first), Some(last)) => {
                let start = first * hop_length;
                let end = (last * hop_length + frame_length).min(samples.len());
                samples[start..end].to_vec()
            }
            _ => Vec::new(),
        }
    }
}

/// Per-frame RMS energy over non-centered frames.
///
/// Shared with the extractor's temporal features; accumulates in f64 to
/// keep long-frame sums stable.
pub(crate) fn frame_rms(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f32> {
    if samples.len() < frame_length || frame_length == 0 {
        return Vec::new();
    }
    let mut rms = Vec::with_capacity((samples.len() - frame_length) / hop_length + 1);
    let mut start = 0;
    while start + frame_length <= samples.len() {
        let frame = &samples[start..start + frame_length];
        let sum_squares: f64 = frame.iter().map(|&x| (x as f64) * (x as f64)).sum();
        rms.push((sum_squares / frame_length as f64).sqrt() as f32);
        start += hop_length;
    }
    rms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sine_wave;

    #[test]
    fn test_empty_audio_rejected() {
        let result = Preprocessor::preprocess(Vec::new(), 22050);
        assert_eq!(result.unwrap_err(), AnalysisError::EmptyAudio);
    }

    #[test]
    fn test_peak_normalization() {
        let samples: Vec<f32> = sine_wave(22050, 150.0, 22050)
            .into_iter()
            .map(|s| s * 0.25)
            .collect();
        let buffer = Preprocessor::preprocess(samples, 22050).unwrap();
        let peak = buffer.samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        assert!(
            (peak - 1.0).abs() < 1e-4,
            "Expected peak 1.0 after normalization, got {}",
            peak
        );
    }

    #[test]
    fn test_silence_only_input_survives() {
        let samples = vec![0.0f32; 22050];
        let buffer = Preprocessor::preprocess(samples, 22050).unwrap();
        // All-silence input cannot be trimmed; the untrimmed signal is kept.
        assert_eq!(buffer.samples.len(), 22050);
    }

    #[test]
    fn test_leading_trailing_silence_trimmed() {
        let sample_rate = 22050;
        let mut samples = vec![0.0f32; sample_rate as usize]; // 1 s silence
        samples.extend(sine_wave(sample_rate, 150.0, sample_rate as usize * 2)); // 2 s tone
        samples.extend(vec![0.0f32; sample_rate as usize]); // 1 s silence
        let original_len = samples.len();

        let buffer = Preprocessor::preprocess(samples, sample_rate).unwrap();
        assert!(
            buffer.samples.len() < original_len,
            "Expected trim to shorten the signal"
        );
        // The voiced region (2 s) must survive, with at most a frame of slack
        // on each side.
        let voiced = sample_rate as usize * 2;
        assert!(buffer.samples.len() >= voiced);
        assert!(buffer.samples.len() <= voiced + 2 * TRIM_FRAME_LENGTH);
    }

    #[test]
    fn test_short_recording_not_destroyed_by_trim() {
        // 0.3 s of tone: shorter than the 0.5 s guard, so the trim result
        // is discarded and the normalized full signal kept.
        let sample_rate = 22050;
        let samples = sine_wave(sample_rate, 200.0, (sample_rate as f32 * 0.3) as usize);
        let original_len = samples.len();
        let buffer = Preprocessor::preprocess(samples, sample_rate).unwrap();
        assert_eq!(buffer.samples.len(), original_len);
    }

    #[test]
    fn test_duration_secs() {
        let buffer = AudioBuffer::new(vec![0.0; 44100], 22050);
        assert!((buffer.duration_secs() - 2.0).abs() < 1e-6);
    }
}
