use num_complex::Complex64;
use std::f64::consts::PI;

use crate::config::WindowKind;
use crate::signal_processing::FrequencyGainCurve;
use crate::signal_processing::windows::window;

/// Real FIR coefficients of a symmetric, linear-phase design
#[derive(Debug, Clone, PartialEq)]
pub struct TapSequence {
    taps: Vec<f64>,
}

impl TapSequence {
    pub fn new(taps: Vec<f64>) -> Self {
        Self { taps }
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }

    /// Whether taps[i] and taps[T-1-i] agree within `tolerance` for every i
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.taps.len();
        (0..n / 2).all(|i| (self.taps[i] - self.taps[n - 1 - i]).abs() <= tolerance)
    }

    /// Largest absolute tap value
    pub fn peak(&self) -> f64 {
        self.taps.iter().fold(0.0, |acc, t| acc.max(t.abs()))
    }

    /// Magnitude response at `f`, a fraction of Nyquist
    pub fn magnitude_at(&self, f: f64) -> f64 {
        frequency_response(&self.taps, &[f])[0].norm()
    }
}

/// Design a linear-phase FIR filter by windowed frequency sampling
///
/// The desired curve is interpolated onto `1 + 2^ceil(log2(num_taps))`
/// uniform points over [0, 1], given the linear phase of a length-`num_taps`
/// filter, and brought back to the time domain with a real inverse DFT. The
/// first `num_taps` samples are then tapered by the window.
///
/// `num_taps` should be odd. A single-tap design is a pure gain equal to the
/// desired DC gain.
pub fn frequency_sampling_design(
    curve: &FrequencyGainCurve,
    num_taps: usize,
    window_kind: WindowKind,
) -> TapSequence {
    if num_taps == 0 {
        return TapSequence::new(Vec::new());
    }
    if num_taps == 1 {
        return TapSequence::new(vec![curve.gain_at(0.0)]);
    }

    let nfreqs = 1 + num_taps.next_power_of_two();
    let last = nfreqs - 1;
    let delay = (num_taps - 1) as f64 / 2.0;

    let spectrum: Vec<Complex64> = (0..nfreqs)
        .map(|k| {
            let x = k as f64 / last as f64;
            Complex64::from_polar(curve.gain_at(x), -delay * PI * x)
        })
        .collect();

    let fft_len = 2 * last;
    let win = window(window_kind, num_taps);

    let mut taps: Vec<f64> = (0..num_taps)
        .map(|m| {
            // Hermitian inverse DFT: the DC and Nyquist bins appear once,
            // every other bin twice (with its conjugate)
            let nyquist_sign = if m % 2 == 0 { 1.0 } else { -1.0 };
            let mut acc = spectrum[0].re + spectrum[last].re * nyquist_sign;
            for (k, bin) in spectrum.iter().enumerate().take(last).skip(1) {
                let theta = 2.0 * PI * (k * m) as f64 / fft_len as f64;
                acc += 2.0 * (bin * Complex64::from_polar(1.0, theta)).re;
            }
            acc / fft_len as f64 * win[m]
        })
        .collect();

    // Average mirrored pairs to remove rounding asymmetry
    for i in 0..num_taps / 2 {
        let j = num_taps - 1 - i;
        let mean = 0.5 * (taps[i] + taps[j]);
        taps[i] = mean;
        taps[j] = mean;
    }

    log::debug!(
        "Frequency-sampling design: {} taps, {} spectral points, {:?} window",
        num_taps,
        nfreqs,
        window_kind
    );

    TapSequence::new(taps)
}

/// Complex frequency response of an FIR filter
///
/// # Arguments
/// * `h` - Filter coefficients
/// * `frequencies` - Normalized frequencies as fractions of Nyquist (units of π rad/sample)
pub fn frequency_response(h: &[f64], frequencies: &[f64]) -> Vec<Complex64> {
    frequencies
        .iter()
        .map(|&f| {
            let omega = f * PI;
            h.iter()
                .enumerate()
                .map(|(n, &h_n)| h_n * Complex64::from_polar(1.0, -omega * n as f64))
                .sum()
        })
        .collect()
}
