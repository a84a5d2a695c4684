use std::f64::consts::PI;

use crate::config::{FilterParameters, StimulusConfig};
use crate::fixed_point::quantize_samples;
use crate::signal_processing::CicResponse;

/// Linear chirp sweeping 0 → Nyquist over `num_samples` samples
///
/// The signal is treated as one second long at `num_samples` samples per
/// second, so sample `i` sits at `t = i / L` and the sweep ends at `L / 2` Hz.
/// A cosine is used, so the first sample equals `amplitude`.
pub fn generate_chirp(num_samples: usize, amplitude: f64) -> Vec<f64> {
    let len = num_samples as f64;
    let f1 = len / 2.0;
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / len;
            // phase = 2π (f0 t + (f1 - f0) t² / 2) with f0 = 0 and t1 = 1
            amplitude * (PI * f1 * t * t).cos()
        })
        .collect()
}

/// Instantaneous frequency of chirp sample `index`, in cycles/sample
pub fn instantaneous_frequency(index: usize, num_samples: usize) -> f64 {
    0.5 * index as f64 / num_samples as f64
}

/// Steady-state CIC magnitude at each sample's instantaneous frequency
pub fn cic_envelope(cic: &CicResponse, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| cic.magnitude(instantaneous_frequency(i, num_samples)))
        .collect()
}

/// Emulate the CIC output by scaling each chirp sample by the droop envelope
///
/// This is amplitude modulation, not convolution; it holds because the
/// sweep is slow compared with the filter's settling time.
pub fn apply_cic_droop(chirp: &[f64], cic: &CicResponse) -> Vec<f64> {
    chirp
        .iter()
        .zip(cic_envelope(cic, chirp.len()))
        .map(|(s, g)| s * g)
        .collect()
}

/// Droopy chirp test vector
#[derive(Debug, Clone)]
pub struct Stimulus {
    /// Chirp before droop
    pub ideal: Vec<f64>,
    /// Chirp after the CIC droop envelope
    pub droopy: Vec<f64>,
    /// `droopy` rounded and clipped to the sample word width
    pub samples: Vec<i64>,
}

impl Stimulus {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Build the droopy chirp and its quantized test vector
pub fn generate_stimulus(params: &FilterParameters, config: &StimulusConfig) -> Stimulus {
    let cic = CicResponse::from_params(params);
    let ideal = generate_chirp(config.num_samples(), config.amplitude());
    let droopy = apply_cic_droop(&ideal, &cic);
    let samples = quantize_samples(&droopy, config.sample_bits());

    log::debug!(
        "Stimulus: {} samples, amplitude {}, {}-bit",
        samples.len(),
        config.amplitude(),
        config.sample_bits()
    );

    Stimulus {
        ideal,
        droopy,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_chirp_length_and_start() {
        let chirp = generate_chirp(2000, 100.0);
        assert_eq!(chirp.len(), 2000);
        assert_abs_diff_eq!(chirp[0], 100.0);
        assert!(chirp.iter().all(|s| s.abs() <= 100.0 + 1e-9));
    }

    #[test]
    fn test_chirp_sweeps_upward() {
        // Count sign changes in the first and last tenth of the sweep
        let chirp = generate_chirp(2000, 1.0);
        let crossings = |s: &[f64]| s.windows(2).filter(|w| w[0].signum() != w[1].signum()).count();
        let early = crossings(&chirp[..200]);
        let late = crossings(&chirp[1800..]);
        assert!(late > 10 * early, "early {} late {}", early, late);
    }

    #[test]
    fn test_instantaneous_frequency() {
        assert_eq!(instantaneous_frequency(0, 2000), 0.0);
        assert_abs_diff_eq!(instantaneous_frequency(1000, 2000), 0.25);
        assert_abs_diff_eq!(instantaneous_frequency(1600, 2000), 0.4);
    }

    #[test]
    fn test_envelope_starts_at_unity_and_decays() {
        let env = cic_envelope(&CicResponse::new(5), 2000);
        assert_abs_diff_eq!(env[0], 1.0, epsilon = 1e-15);
        assert!(env.windows(2).all(|w| w[1] < w[0]));
        assert!(env[1999] > 0.0);
    }

    #[test]
    fn test_stimulus_samples_in_range() {
        let stimulus = generate_stimulus(&FilterParameters::default(), &StimulusConfig::default());
        assert_eq!(stimulus.len(), 2000);
        assert_eq!(stimulus.samples[0], 100);
        assert!(stimulus.samples.iter().all(|s| (-127..=127).contains(s)));
    }

    #[test]
    fn test_loud_stimulus_is_clipped() {
        let config = StimulusConfig::new(500, 1000.0, 8).unwrap();
        let stimulus = generate_stimulus(&FilterParameters::default(), &config);
        assert!(stimulus.samples.iter().all(|s| (-127..=127).contains(s)));
        assert!(stimulus.samples.contains(&127));
    }
}
