// Spectral features - centroid of the magnitude spectrum
//
// The centroid is the magnitude-weighted mean frequency of a frame; its
// mean over frames summarizes where the recording's energy sits.

/// Mean spectral centroid in Hz over a magnitude spectrogram.
///
/// # Arguments
/// * `spectrogram` - Per-frame magnitude spectra (positive frequencies)
/// * `sample_rate` - Sample rate in Hz
/// * `frame_length` - FFT frame length that produced the spectra
///
/// # Returns
/// * Mean of per-frame centroids; frames with zero total magnitude
///   contribute 0 Hz. Returns 0.0 when no frames exist.
pub fn spectral_centroid_mean(
    spectrogram: &[Vec<f32>],
    sample_rate: u32,
    frame_length: usize,
) -> f32 {
    if spectrogram.is_empty() || frame_length == 0 {
        return 0.0;
    }
    let bin_width = sample_rate as f64 / frame_length as f64;

    let mut sum = 0.0f64;
    for spectrum in spectrogram {
        let mut weighted = 0.0f64;
        let mut total = 0.0f64;
        for (bin, &magnitude) in spectrum.iter().enumerate() {
            let magnitude = magnitude as f64;
            weighted += bin as f64 * bin_width * magnitude;
            total += magnitude;
        }
        if total > 0.0 {
            sum += weighted / total;
        }
    }
    (sum / spectrogram.len() as f64) as f32
}
