use crate::error::{Result, SwaError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One-sided power spectral density estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSpectrum {
    /// Frequency axis from DC to the Nyquist frequency, in Hz.
    pub frequencies_hz: Vec<f64>,
    /// Density values in (signal unit)^2 per Hz.
    pub power: Vec<f64>,
}

/// Least-squares line through the log-log spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralFit {
    /// Power-law exponent of the spectrum.
    pub slope: f64,
    /// Natural-log offset of the fitted line.
    pub intercept: f64,
}

impl SpectralFit {
    /// Fitted density at frequency `f`.
    pub fn evaluate(&self, f: f64) -> f64 {
        self.intercept.exp() * f.powf(self.slope)
    }
}

/// One-sided boxcar periodogram of a real-valued signal.
///
/// The signal is zero-padded to the next power of two and the density is
/// normalized by `sample_rate_hz` times the unpadded sample count, so the
/// integral of the spectrum recovers the mean square of the signal.
/// `sample_rate_hz` must be positive.
pub fn periodogram(samples: &[f64], sample_rate_hz: f64) -> PowerSpectrum {
    if samples.is_empty() {
        return PowerSpectrum {
            frequencies_hz: Vec::new(),
            power: Vec::new(),
        };
    }
    let n_fft = samples.len().next_power_of_two();
    let mut buffer: Vec<(f64, f64)> = Vec::with_capacity(n_fft);
    for &sample in samples {
        buffer.push((sample, 0.0));
    }
    buffer.resize(n_fft, (0.0, 0.0));
    fft_in_place(&mut buffer);

    let scale = 1.0 / (sample_rate_hz * samples.len() as f64);
    let out_len = n_fft / 2 + 1;
    let mut frequencies_hz = Vec::with_capacity(out_len);
    let mut power = Vec::with_capacity(out_len);
    for (i, &(re, im)) in buffer.iter().take(out_len).enumerate() {
        let mut density = (re * re + im * im) * scale;
        // fold the redundant negative-frequency half into the interior bins
        if i > 0 && i < n_fft / 2 {
            density *= 2.0;
        }
        frequencies_hz.push(i as f64 * sample_rate_hz / n_fft as f64);
        power.push(density);
    }
    PowerSpectrum {
        frequencies_hz,
        power,
    }
}

/// Sampling rate implied by an epoch axis, as the reciprocal of the median
/// positive step. `None` when every step is zero or there are fewer than two
/// epochs.
pub fn estimate_sample_rate(epochs_ns: &[i64]) -> Option<f64> {
    let mut deltas: Vec<i64> = epochs_ns
        .iter()
        .tuple_windows()
        .map(|(a, b)| b - a)
        .filter(|&delta| delta > 0)
        .collect();
    if deltas.is_empty() {
        return None;
    }
    deltas.sort_unstable();
    let middle = deltas.len() / 2;
    let median_ns = if deltas.len() % 2 == 0 {
        (deltas[middle - 1] as f64 + deltas[middle] as f64) / 2.0
    } else {
        deltas[middle] as f64
    };
    Some(1e9 / median_ns)
}

/// Fit a power law through the usable bins of a spectrum.
///
/// The DC bin and any bin with non-positive or non-finite density are
/// excluded from the fit.
pub fn fit_spectral_slope(spectrum: &PowerSpectrum) -> Result<SpectralFit> {
    let points: Vec<(f64, f64)> = spectrum
        .frequencies_hz
        .iter()
        .zip(&spectrum.power)
        .filter(|&(&f, &p)| f > 0.0 && p > 0.0 && f.is_finite() && p.is_finite())
        .map(|(&f, &p)| (f.ln(), p.ln()))
        .collect();
    if points.len() < 2 {
        return Err(SwaError::InsufficientSpectrum {
            needed: 2,
            found: points.len(),
        });
    }
    let count = points.len() as f64;
    let mean_x: f64 = points.iter().map(|&(x, _)| x).sum::<f64>() / count;
    let mean_y: f64 = points.iter().map(|&(_, y)| y).sum::<f64>() / count;
    let mut covariance = 0.0;
    let mut variance = 0.0;
    for &(x, y) in &points {
        covariance += (x - mean_x) * (y - mean_y);
        variance += (x - mean_x) * (x - mean_x);
    }
    let slope = covariance / variance;
    Ok(SpectralFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

// radix-2 decimation-in-time transform; length must be a power of two
fn fft_in_place(data: &mut [(f64, f64)]) {
    let n = data.len();
    if n <= 1 {
        return;
    }
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            data.swap(i, j);
        }
    }
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let step = -2.0 * PI / len as f64;
        for start in (0..n).step_by(len) {
            for k in 0..half {
                let angle = step * k as f64;
                let (tw_im, tw_re) = angle.sin_cos();
                let (u_re, u_im) = data[start + k];
                let (v_re, v_im) = data[start + k + half];
                let rot_re = tw_re * v_re - tw_im * v_im;
                let rot_im = tw_re * v_im + tw_im * v_re;
                data[start + k] = (u_re + rot_re, u_im + rot_im);
                data[start + k + half] = (u_re - rot_re, u_im - rot_im);
            }
        }
        len *= 2;
    }
}
