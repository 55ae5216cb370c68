// FFT module - Fast Fourier Transform computation
//
// Handles FFT computation with Hann windowing to reduce spectral leakage.
// Magnitude spectra feed the pitch, centroid, cepstral, and HPSS stages.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// FFT processor that computes magnitude spectra from audio frames
pub struct FftProcessor {
    fft: Arc<dyn Fft<f32>>,
    frame_length: usize,
    /// Hann window (pre-computed)
    window: Vec<f32>,
}

impl FftProcessor {
    /// Create a new FFT processor for the given frame length.
    pub fn new(frame_length: usize) -> Self {
        // Pre-compute Hann window to reduce spectral leakage
        let denom = (frame_length.max(2) - 1) as f32;
        let window = (0..frame_length)
            .map(|i| 0.5 * (1.0 - ((2.0 * std::f32::consts::PI * i as f32) / denom).cos()))
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(frame_length);

        Self {
            fft,
            frame_length,
            window,
        }
    }

    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Number of positive-frequency bins produced per frame.
    pub fn num_bins(&self) -> usize {
        self.frame_length / 2 + 1
    }

    /// Compute the magnitude spectrum of one frame.
    ///
    /// Applies Hann windowing, performs the FFT, and returns magnitudes for
    /// positive frequencies only (exploiting real-input symmetry). Frames
    /// shorter than the frame length are zero-padded.
    pub fn magnitude_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = Vec::with_capacity(self.frame_length);

        for (i, &sample) in frame.iter().take(self.frame_length).enumerate() {
            buffer.push(Complex::new(sample * self.window[i], 0.0));
        }
        while buffer.len() < self.frame_length {
            buffer.push(Complex::new(0.0, 0.0));
        }

        self.fft.process(&mut buffer);

        buffer[..self.num_bins()].iter().map(|c| c.norm()).collect()
    }

    /// Compute magnitude spectra over non-centered frames of the signal.
    ///
    /// Returns one spectrum per frame at offsets 0, hop, 2·hop, ... while a
    /// full frame fits. Callers choose frame length = min(2048, signal
    /// length), so every non-empty signal yields at least one frame.
    pub fn spectrogram(&self, samples: &[f32], hop_length: usize) -> Vec<Vec<f32>> {
        let hop = hop_length.max(1);
        if samples.len() < self.frame_length {
            return Vec::new();
        }
        let mut frames = Vec::with_capacity((samples.len() - self.frame_length) / hop + 1);
        let mut start = 0;
        while start + self.frame_length <= samples.len() {
            frames.push(self.magnitude_spectrum(&samples[start..start + self.frame_length]));
            start += hop;
        }
        frames
    }
}
