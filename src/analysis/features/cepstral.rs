// Cepstral features - MFCC summary statistics
//
// Classic MFCC chain: power spectrum -> 40-filter mel bank (HTK scale) ->
// log with a small floor -> orthonormal DCT-II -> first 13 coefficients.
// The recording is summarized by the scalar mean and standard deviation
// over all coefficients of all frames.

/// Number of triangular mel filters
const NUM_MEL_FILTERS: usize = 40;

/// Number of cepstral coefficients kept per frame
const NUM_COEFFICIENTS: usize = 13;

/// Floor applied before the log to avoid -inf on silent bands
const LOG_FLOOR: f64 = 1e-10;

/// Mel summary statistics for one recording.
#[derive(Debug, Clone, Copy)]
pub struct MfccSummary {
    pub mfcc_mean: f32,
    pub mfcc_std: f32,
}

/// Mel filterbank mapped onto FFT bins.
pub struct MelFilterBank {
    /// filters[m][k] = weight of FFT bin k in mel filter m
    filters: Vec<Vec<f64>>,
}

fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10f64.powf(mel / 2595.0) - 1.0)
}

impl MelFilterBank {
    /// Build a triangular filterbank spanning 0 Hz to Nyquist.
    pub fn new(sample_rate: u32, frame_length: usize) -> Self {
        let num_bins = frame_length / 2 + 1;
        let nyquist = sample_rate as f64 / 2.0;
        let mel_max = hz_to_mel(nyquist);

        // NUM_MEL_FILTERS triangles need NUM_MEL_FILTERS + 2 edge points.
        let edges: Vec<f64> = (0..NUM_MEL_FILTERS + 2)
            .map(|i| {
                let mel = mel_max * i as f64 / (NUM_MEL_FILTERS + 1) as f64;
                mel_to_hz(mel) * frame_length as f64 / sample_rate as f64
            })
            .collect();

        let mut filters = Vec::with_capacity(NUM_MEL_FILTERS);
        for m in 0..NUM_MEL_FILTERS {
            let (left, center, right) = (edges[m], edges[m + 1], edges[m + 2]);
            let mut weights = vec![0.0f64; num_bins];
            for (k, w) in weights.iter_mut().enumerate() {
                let bin = k as f64;
                if bin > left && bin < center {
                    *w = (bin - left) / (center - left);
                } else if (bin - center).abs() < f64::EPSILON {
                    *w = 1.0;
                } else if bin > center && bin < right {
                    *w = (right - bin) / (right - center);
                }
            }
            filters.push(weights);
        }
        Self { filters }
    }

    /// Apply the bank to one magnitude spectrum, returning log mel energies.
    fn log_mel_energies(&self, spectrum: &[f32]) -> Vec<f64> {
        self.filters
            .iter()
            .map(|filter| {
                let energy: f64 = filter
                    .iter()
                    .zip(spectrum.iter())
                    .map(|(&w, &m)| w * (m as f64) * (m as f64))
                    .sum();
                energy.max(LOG_FLOOR).ln()
            })
            .collect()
    }
}

/// Orthonormal DCT-II of the log mel energies, truncated to the first
/// `NUM_COEFFICIENTS` terms.
fn dct_coefficients(log_energies: &[f64]) -> Vec<f64> {
    let n = log_energies.len();
    let scale0 = (1.0 / n as f64).sqrt();
    let scale = (2.0 / n as f64).sqrt();

    (0..NUM_COEFFICIENTS.min(n))
        .map(|k| {
            let sum: f64 = log_energies
                .iter()
                .enumerate()
                .map(|(i, &e)| e * (std::f64::consts::PI * k as f64 * (i as f64 + 0.5) / n as f64).cos())
                .sum();
            sum * if k == 0 { scale0 } else { scale }
        })
        .collect()
}

/// Compute MFCC mean and standard deviation over a magnitude spectrogram.
///
/// Returns zeros when no frames exist.
pub fn mfcc_summary(
    spectrogram: &[Vec<f32>],
    sample_rate: u32,
    frame_length: usize,
) -> MfccSummary {
    if spectrogram.is_empty() {
        return MfccSummary {
            mfcc_mean: 0.0,
            mfcc_std: 0.0,
        };
    }

    let bank = MelFilterBank::new(sample_rate, frame_length);
    let mut values: Vec<f64> = Vec::with_capacity(spectrogram.len() * NUM_COEFFICIENTS);
    for spectrum in spectrogram {
        let log_energies = bank.log_mel_energies(spectrum);
        values.extend(dct_coefficients(&log_energies));
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    MfccSummary {
        mfcc_mean: mean as f32,
        mfcc_std: variance.sqrt() as f32,
    }
}
