// Pitch features - fundamental frequency tracking, pitch statistics, jitter
//
// Frame-wise spectral peak picking restricted to the speaking-voice band
// (50-400 Hz), refined with parabolic interpolation between bins. A frame
// counts as voiced only when its in-band peak carries at least 10% of the
// frame's strongest spectral component; breathy or silent frames are
// skipped rather than polluting the statistics.

/// Lower bound of the fundamental-frequency search band (Hz)
const PITCH_FMIN_HZ: f32 = 50.0;

/// Upper bound of the fundamental-frequency search band (Hz)
const PITCH_FMAX_HZ: f32 = 400.0;

/// In-band peak must be at least this fraction of the frame's global peak
const VOICING_RATIO: f32 = 0.1;

/// Magnitudes below this are treated as silence
const MAGNITUDE_EPSILON: f32 = 1e-10;

/// Typical adult fundamental frequency, used when no voiced frames exist (Hz)
const DEFAULT_PITCH_MEAN: f32 = 150.0;

/// Typical pitch spread, used when no voiced frames exist (Hz)
const DEFAULT_PITCH_STD: f32 = 40.0;

/// Typical healthy-voice jitter, used when periods cannot be measured
const DEFAULT_JITTER: f32 = 0.005;

/// Pitch statistics and jitter for one recording.
#[derive(Debug, Clone, Copy)]
pub struct PitchFeatures {
    pub pitch_mean: f32,
    pub pitch_std: f32,
    pub jitter: f32,
}

/// Extract per-frame fundamental frequencies from a magnitude spectrogram.
///
/// Unvoiced frames are omitted, so the returned track may be shorter than
/// the spectrogram.
pub fn pitch_track(spectrogram: &[Vec<f32>], sample_rate: u32, frame_length: usize) -> Vec<f32> {
    if frame_length == 0 {
        return Vec::new();
    }
    let bin_width = sample_rate as f32 / frame_length as f32;
    let lo_bin = (PITCH_FMIN_HZ / bin_width).ceil() as usize;
    let hi_bin = ((PITCH_FMAX_HZ / bin_width).floor() as usize).min(frame_length / 2);
    if lo_bin >= hi_bin {
        return Vec::new();
    }

    let mut track = Vec::new();
    for spectrum in spectrogram {
        if spectrum.len() <= hi_bin {
            continue;
        }
        let global_peak = spectrum.iter().copied().fold(0.0f32, f32::max);

        let (band_bin, band_peak) = spectrum[lo_bin..=hi_bin]
            .iter()
            .enumerate()
            .fold((0usize, 0.0f32), |(best_i, best_m), (i, &m)| {
                if m > best_m {
                    (i, m)
                } else {
                    (best_i, best_m)
                }
            });
        let bin = lo_bin + band_bin;

        // Voicing gate: the in-band peak must dominate enough of the frame.
        if band_peak <= MAGNITUDE_EPSILON || band_peak < VOICING_RATIO * global_peak {
            continue;
        }

        track.push(refine_peak(spectrum, bin) * bin_width);
    }
    track
}

/// Parabolic interpolation around a spectral peak bin.
///
/// Fits a parabola through the peak and its neighbors and returns the
/// fractional bin of the vertex, clamped to half a bin either side.
fn refine_peak(spectrum: &[f32], bin: usize) -> f32 {
    if bin == 0 || bin + 1 >= spectrum.len() {
        return bin as f32;
    }
    let left = spectrum[bin - 1];
    let center = spectrum[bin];
    let right = spectrum[bin + 1];
    let denom = left - 2.0 * center + right;
    if denom.abs() <= MAGNITUDE_EPSILON {
        return bin as f32;
    }
    let delta = (0.5 * (left - right) / denom).clamp(-0.5, 0.5);
    bin as f32 + delta
}

/// Pitch mean/std and jitter from a voiced-frame pitch track.
///
/// An empty track (no voiced frames) yields the documented defaults for a
/// typical adult voice, so silence and noise still produce finite features.
pub fn pitch_features(track: &[f32]) -> PitchFeatures {
    if track.is_empty() {
        return PitchFeatures {
            pitch_mean: DEFAULT_PITCH_MEAN,
            pitch_std: DEFAULT_PITCH_STD,
            jitter: DEFAULT_JITTER,
        };
    }

    let n = track.len() as f64;
    let mean: f64 = track.iter().map(|&f| f as f64).sum::<f64>() / n;
    let variance: f64 = track
        .iter()
        .map(|&f| {
            let d = f as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    PitchFeatures {
        pitch_mean: mean as f32,
        pitch_std: variance.sqrt() as f32,
        jitter: jitter_from_track(track),
    }
}

/// Jitter: mean absolute period-to-period difference relative to the mean
/// period, where period = 1/f0 per voiced frame.
fn jitter_from_track(track: &[f32]) -> f32 {
    let periods: Vec<f64> = track
        .iter()
        .filter(|&&f| f > 0.0)
        .map(|&f| 1.0 / f as f64)
        .collect();
    if periods.len() < 2 {
        return DEFAULT_JITTER;
    }

    let mean_period: f64 = periods.iter().sum::<f64>() / periods.len() as f64;
    if mean_period <= 0.0 {
        return DEFAULT_JITTER;
    }

    let mean_delta: f64 = periods
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .sum::<f64>()
        / (periods.len() - 1) as f64;

    (mean_delta / mean_period) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::fft::FftProcessor;
    use crate::testing::sine_wave;

    fn track_for(freq: f32) -> Vec<f32> {
        let sample_rate = 22050;
        let processor = FftProcessor::new(2048);
        let signal = sine_wave(sample_rate, freq, 44100);
        let spectrogram = processor.spectrogram(&signal, 512);
        pitch_track(&spectrogram, sample_rate, 2048)
    }

    #[test]
    fn test_sine_pitch_recovered() {
        let track = track_for(150.0);
        assert!(!track.is_empty());
        let features = pitch_features(&track);
        assert!(
            (features.pitch_mean - 150.0).abs() < 15.0,
            "Expected ~150 Hz, got {}",
            features.pitch_mean
        );
        assert!(features.pitch_std < 10.0);
        assert!(features.jitter < 0.01, "Steady tone jitter {}", features.jitter);
    }

    #[test]
    fn test_out_of_band_tone_is_unvoiced() {
        // 1 kHz sits outside the 50-400 Hz search band and has no in-band
        // energy, so no frame passes the voicing gate.
        let track = track_for(1000.0);
        assert!(track.is_empty());
    }

    #[test]
    fn test_silence_uses_defaults() {
        let features = pitch_features(&[]);
        assert_eq!(features.pitch_mean, DEFAULT_PITCH_MEAN);
        assert_eq!(features.pitch_std, DEFAULT_PITCH_STD);
        assert_eq!(features.jitter, DEFAULT_JITTER);
    }

    #[test]
    fn test_single_voiced_frame_jitter_default() {
        let features = pitch_features(&[200.0]);
        assert_eq!(features.jitter, DEFAULT_JITTER);
        assert_eq!(features.pitch_mean, 200.0);
        assert_eq!(features.pitch_std, 0.0);
    }

    #[test]
    fn test_wobbly_pitch_raises_jitter() {
        // Alternating periods produce measurable jitter.
        let steady = pitch_features(&[150.0; 20]).jitter;
        let wobble: Vec<f32> = (0..20)
            .map(|i| if i % 2 == 0 { 145.0 } else { 155.0 })
            .collect();
        let wobbly = pitch_features(&wobble).jitter;
        assert!(wobbly > steady);
        assert!(wobbly > 0.01);
    }
}
