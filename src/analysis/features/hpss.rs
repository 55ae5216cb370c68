// HPSS-based harmonic-to-noise ratio
//
// Median-filtering HPSS: smoothing the magnitude spectrogram along time
// keeps sustained harmonics, smoothing along frequency keeps broadband
// (noise-like) structure. Soft Wiener masks split each bin's magnitude
// between the two layers, and the HNR is the dB ratio of their energies.

/// Median filter kernel length (clamped to the available extent, odd)
const MEDIAN_KERNEL: usize = 31;

/// Keeps the ratio finite when one layer carries no energy
const ENERGY_EPSILON: f64 = 1e-10;

/// Harmonic-to-noise ratio in dB for a magnitude spectrogram.
///
/// Returns 0.0 dB when the spectrogram is empty or carries no energy in
/// either layer beyond the epsilon floor (both energies collapse to the
/// same epsilon, so the ratio is 1).
pub fn harmonic_noise_ratio(spectrogram: &[Vec<f32>]) -> f32 {
    if spectrogram.is_empty() || spectrogram[0].is_empty() {
        return 0.0;
    }
    let num_frames = spectrogram.len();
    let num_bins = spectrogram[0].len();

    // Harmonic estimate: median across time per frequency bin.
    let mut harmonic = vec![vec![0.0f64; num_bins]; num_frames];
    let mut column = vec![0.0f64; num_frames];
    for bin in 0..num_bins {
        for (t, spectrum) in spectrogram.iter().enumerate() {
            column[t] = spectrum[bin] as f64;
        }
        for t in 0..num_frames {
            harmonic[t][bin] = windowed_median(&column, t);
        }
    }

    // Percussive estimate: median across frequency per frame.
    let mut percussive = vec![vec![0.0f64; num_bins]; num_frames];
    let mut row = vec![0.0f64; num_bins];
    for (t, spectrum) in spectrogram.iter().enumerate() {
        for (k, &magnitude) in spectrum.iter().enumerate() {
            row[k] = magnitude as f64;
        }
        for k in 0..num_bins {
            percussive[t][k] = windowed_median(&row, k);
        }
    }

    // Soft Wiener masks split each bin between the layers, then the layer
    // energies are compared. Masked magnitudes are squared so the ratio is
    // an energy ratio.
    let mut harmonic_energy = 0.0f64;
    let mut percussive_energy = 0.0f64;
    for t in 0..num_frames {
        for k in 0..num_bins {
            let magnitude = spectrogram[t][k] as f64;
            let h2 = harmonic[t][k] * harmonic[t][k];
            let p2 = percussive[t][k] * percussive[t][k];
            let total = h2 + p2;
            if total <= ENERGY_EPSILON {
                continue;
            }
            let harmonic_part = magnitude * (h2 / total);
            let percussive_part = magnitude * (p2 / total);
            harmonic_energy += harmonic_part * harmonic_part;
            percussive_energy += percussive_part * percussive_part;
        }
    }

    (10.0 * ((harmonic_energy + ENERGY_EPSILON) / (percussive_energy + ENERGY_EPSILON)).log10())
        as f32
}

/// Median of `values` in a kernel-length window centered on `index`,
/// clamped at the array edges.
fn windowed_median(values: &[f64], index: usize) -> f64 {
    let half = (MEDIAN_KERNEL.min(values.len()) | 1) / 2;
    let lo = index.saturating_sub(half);
    let hi = (index + half + 1).min(values.len());

    let mut window: Vec<f64> = values[lo..hi].to_vec();
    // total_cmp keeps NaN magnitudes sortable; a NaN that reaches this far
    // propagates into the ratio and trips the extractor's finiteness check
    // instead of panicking here.
    window.sort_by(|a, b| a.total_cmp(b));
    let mid = window.len() / 2;
    if window.len() % 2 == 1 {
        window[mid]
    } else {
        (window[mid - 1] + window[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::fft::FftProcessor;
    use crate::testing::{noise, sine_wave};

    #[test]
    fn test_pure_tone_is_harmonic_dominant() {
        let processor = FftProcessor::new(2048);
        let spectrogram = processor.spectrogram(&sine_wave(22050, 150.0, 44100), 512);
        let hnr = harmonic_noise_ratio(&spectrogram);
        assert!(hnr > 10.0, "Pure tone should be harmonic dominant, got {} dB", hnr);
    }

    #[test]
    fn test_tone_beats_noise() {
        let processor = FftProcessor::new(2048);
        let tone = processor.spectrogram(&sine_wave(22050, 150.0, 44100), 512);
        let white = processor.spectrogram(&noise(44100, 11), 512);
        assert!(harmonic_noise_ratio(&tone) > harmonic_noise_ratio(&white));
    }

    #[test]
    fn test_empty_spectrogram_is_zero() {
        assert_eq!(harmonic_noise_ratio(&[]), 0.0);
    }

    #[test]
    fn test_silence_is_zero() {
        let processor = FftProcessor::new(2048);
        let spectrogram = processor.spectrogram(&vec![0.0f32; 8192], 512);
        let hnr = harmonic_noise_ratio(&spectrogram);
        assert_eq!(hnr, 0.0);
    }

    #[test]
    fn test_nan_magnitudes_propagate_without_panicking() {
        let processor = FftProcessor::new(2048);
        let mut signal = sine_wave(22050, 150.0, 22050);
        signal[11025] = f32::NAN;
        let spectrogram = processor.spectrogram(&signal, 512);

        let hnr = harmonic_noise_ratio(&spectrogram);
        assert!(hnr.is_nan());
    }

    #[test]
    fn test_windowed_median_edges() {
        let values = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        // Kernel clamps to the full array here, so every position sees the
        // same window near the edges.
        let median = windowed_median(&values, 0);
        assert!(median.is_finite());
        assert!((1.0..=5.0).contains(&median));
    }
}
