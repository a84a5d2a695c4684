use serde::Serialize;

use crate::config::{FilterParameters, StimulusConfig};
use crate::signal_processing::math::linspace;
use crate::signal_processing::{CicResponse, TapSequence, apply_fir, rms};

use super::Stimulus;

/// Number of frequency points used to scan the passband for flatness
const FLATNESS_POINTS: usize = 256;

/// Index of the first stimulus sample past the passband edge, `floor(L * fp)`
pub fn passband_end_sample(num_samples: usize, passband_edge: f64) -> usize {
    ((num_samples as f64 * passband_edge).floor() as usize).min(num_samples)
}

/// Relative RMS deviation of `signal` from `reference` over `[0, end)`
///
/// Returns |rms(signal) / rms(reference) - 1|. A silent reference gives 0
/// when the signal is silent too, otherwise infinity.
pub fn droop_error(reference: &[f64], signal: &[f64], end: usize) -> f64 {
    let end = end.min(reference.len()).min(signal.len());
    let reference_rms = rms(&reference[..end]);
    let signal_rms = rms(&signal[..end]);
    if reference_rms == 0.0 {
        return if signal_rms == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (signal_rms / reference_rms - 1.0).abs()
}

/// Magnitude of the CIC followed by the compensator at `f` (fraction of Nyquist)
pub fn compensated_response(cic: &CicResponse, taps: &TapSequence, f: f64) -> f64 {
    taps.magnitude_at(f) * cic.magnitude_nyquist(f)
}

/// Worst-case |cascade - 1| over the passband
pub fn passband_flatness(params: &FilterParameters, taps: &TapSequence) -> f64 {
    let cic = CicResponse::from_params(params);
    linspace(0.0, params.passband_edge(), FLATNESS_POINTS)
        .into_iter()
        .map(|f| (compensated_response(&cic, taps, f) - 1.0).abs())
        .fold(0.0, f64::max)
}

/// Outcome of filtering the droopy chirp with the designed taps
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Samples `[0, passband_end_sample)` lie in the passband
    pub passband_end_sample: usize,
    /// Passband RMS error of the droopy input against the ideal chirp
    pub droop_error_before: f64,
    /// Passband RMS error of the compensated output against the ideal chirp
    pub droop_error_after: f64,
    /// Worst-case deviation of the CIC + FIR cascade from unity in the passband
    pub max_passband_deviation: f64,
}

impl VerificationReport {
    /// Fraction of the original droop error removed by the compensator
    pub fn improvement(&self) -> f64 {
        if self.droop_error_before == 0.0 {
            return 0.0;
        }
        1.0 - self.droop_error_after / self.droop_error_before
    }
}

/// Verification run: the droopy stimulus and its compensated output
#[derive(Debug, Clone)]
pub struct Verification {
    /// Floating-point compensator output, same length as the stimulus
    pub filtered: Vec<f64>,
    pub report: VerificationReport,
}

/// Filter the droopy chirp with the unquantized taps and measure the droop
pub fn verify(
    params: &FilterParameters,
    stimulus_config: &StimulusConfig,
    stimulus: &Stimulus,
    taps: &TapSequence,
) -> Verification {
    let filtered = apply_fir(taps, &stimulus.droopy);
    let end = passband_end_sample(stimulus_config.num_samples(), params.passband_edge());

    let report = VerificationReport {
        passband_end_sample: end,
        droop_error_before: droop_error(&stimulus.ideal, &stimulus.droopy, end),
        droop_error_after: droop_error(&stimulus.ideal, &filtered, end),
        max_passband_deviation: passband_flatness(params, taps),
    };

    log::debug!(
        "Verification: droop error {:.4} -> {:.4}, passband deviation {:.4}",
        report.droop_error_before,
        report.droop_error_after,
        report.max_passband_deviation
    );

    Verification { filtered, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::generate_stimulus;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_passband_end_sample() {
        assert_eq!(passband_end_sample(2000, 0.8), 1600);
        assert_eq!(passband_end_sample(10, 0.55), 5);
    }

    #[test]
    fn test_droop_error() {
        let reference = [1.0, -1.0, 1.0, -1.0];
        let half = [0.5, -0.5, 0.5, -0.5];
        assert_abs_diff_eq!(droop_error(&reference, &half, 4), 0.5);
        assert_abs_diff_eq!(droop_error(&reference, &reference, 4), 0.0);
        assert_eq!(droop_error(&[0.0; 4], &[0.0; 4], 4), 0.0);
        assert!(droop_error(&[0.0; 4], &half, 4).is_infinite());
    }

    #[test]
    fn test_identity_taps_leave_droop_untouched() {
        let params = FilterParameters::default();
        let config = StimulusConfig::default();
        let stimulus = generate_stimulus(&params, &config);
        let identity = TapSequence::new(vec![1.0]);
        let verification = verify(&params, &config, &stimulus, &identity);
        let report = &verification.report;
        assert_abs_diff_eq!(report.droop_error_before, report.droop_error_after, epsilon = 1e-12);
        assert_abs_diff_eq!(report.improvement(), 0.0, epsilon = 1e-9);
        assert_eq!(verification.filtered, stimulus.droopy);
    }
}
