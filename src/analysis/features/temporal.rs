// Temporal features - frame energy, shimmer, and zero-crossing rate
//
// All three work directly on the time-domain signal with the same
// non-centered framing the spectral stages use.

use crate::audio::frame_rms;

/// Shimmer fallback when the signal has too few frames or is silent
const DEFAULT_SHIMMER: f32 = 0.02;

/// Amplitudes below this are treated as silence
const SILENCE_EPSILON: f64 = 1e-10;

/// Mean per-frame RMS energy.
///
/// Returns 0.0 when the signal is shorter than one frame.
pub fn energy_mean(samples: &[f32], frame_length: usize, hop_length: usize) -> f32 {
    let rms = frame_rms(samples, frame_length, hop_length);
    if rms.is_empty() {
        return 0.0;
    }
    let sum: f64 = rms.iter().map(|&r| r as f64).sum();
    (sum / rms.len() as f64) as f32
}

/// Shimmer: mean absolute frame-to-frame RMS difference, relative to the
/// mean RMS.
///
/// Falls back to a typical healthy-voice value (0.02) when fewer than two
/// frames exist or the signal is effectively silent, so silence never
/// produces a meaningless ratio.
pub fn shimmer(samples: &[f32], frame_length: usize, hop_length: usize) -> f32 {
    let rms = frame_rms(samples, frame_length, hop_length);
    if rms.len() < 2 {
        return DEFAULT_SHIMMER;
    }

    let mean_rms: f64 = rms.iter().map(|&r| r as f64).sum::<f64>() / rms.len() as f64;
    if mean_rms <= SILENCE_EPSILON {
        return DEFAULT_SHIMMER;
    }

    let mean_delta: f64 = rms
        .windows(2)
        .map(|pair| (pair[1] as f64 - pair[0] as f64).abs())
        .sum::<f64>()
        / (rms.len() - 1) as f64;

    (mean_delta / mean_rms) as f32
}

/// Mean per-frame zero-crossing rate.
///
/// Each frame's rate counts sign changes between adjacent samples divided
/// by the number of sample pairs, giving a value in [0, 1].
pub fn zero_crossing_rate(samples: &[f32], frame_length: usize, hop_length: usize) -> f32 {
    if samples.len() < frame_length || frame_length < 2 {
        return 0.0;
    }

    let mut rates: Vec<f32> = Vec::new();
    let mut start = 0;
    while start + frame_length <= samples.len() {
        let frame = &samples[start..start + frame_length];
        let crossings = frame
            .windows(2)
            .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
            .count();
        rates.push(crossings as f32 / (frame_length - 1) as f32);
        start += hop_length;
    }

    if rates.is_empty() {
        return 0.0;
    }
    rates.iter().sum::<f32>() / rates.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{noise, sine_wave};

    #[test]
    fn test_steady_sine_has_low_shimmer() {
        let signal = sine_wave(22050, 150.0, 44100);
        let value = shimmer(&signal, 2048, 512);
        assert!(value < 0.01, "Steady tone shimmer should be small, got {}", value);
    }

    #[test]
    fn test_silence_shimmer_uses_default() {
        let silence = vec![0.0f32; 44100];
        assert_eq!(shimmer(&silence, 2048, 512), DEFAULT_SHIMMER);
    }

    #[test]
    fn test_short_signal_shimmer_uses_default() {
        let signal = sine_wave(22050, 150.0, 1000);
        // Fewer than two frames at this frame length.
        assert_eq!(shimmer(&signal, 2048, 512), DEFAULT_SHIMMER);
    }

    #[test]
    fn test_energy_mean_of_unit_sine() {
        // RMS of a full-scale sine is 1/sqrt(2).
        let signal = sine_wave(22050, 150.0, 44100);
        let energy = energy_mean(&signal, 2048, 512);
        assert!(
            (energy - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.02,
            "Expected ~0.707, got {}",
            energy
        );
    }

    #[test]
    fn test_zcr_tracks_frequency() {
        // A sine at f Hz crosses zero 2f times per second, so the rate per
        // sample pair is roughly 2f / sample_rate.
        let sample_rate = 22050;
        let low = zero_crossing_rate(&sine_wave(sample_rate, 100.0, 44100), 2048, 512);
        let high = zero_crossing_rate(&sine_wave(sample_rate, 1000.0, 44100), 2048, 512);
        assert!((low - 2.0 * 100.0 / sample_rate as f32).abs() < 0.005);
        assert!((high - 2.0 * 1000.0 / sample_rate as f32).abs() < 0.02);
        assert!(high > low);
    }

    #[test]
    fn test_noise_zcr_higher_than_tone() {
        let tone = zero_crossing_rate(&sine_wave(22050, 150.0, 44100), 2048, 512);
        let white = zero_crossing_rate(&noise(44100, 7), 2048, 512);
        assert!(white > tone);
    }
}
