use crate::config::FilterParameters;
use crate::error::{DesignError, Result};
use crate::signal_processing::CicResponse;
use crate::signal_processing::math::{interpolate, linspace};

/// Desired magnitude response sampled on a frequency grid
///
/// Frequencies are fractions of Nyquist, strictly increasing from 0 to 1.
/// Gains are finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGainCurve {
    freqs: Vec<f64>,
    gains: Vec<f64>,
}

impl FrequencyGainCurve {
    /// Build a curve from externally supplied points
    ///
    /// # Errors
    /// Returns `DesignError::Curve` if the lengths differ, fewer than two
    /// points are given, the grid does not start at 0 and end at 1, the grid
    /// is not strictly increasing, or any gain is negative or non-finite.
    pub fn new(freqs: Vec<f64>, gains: Vec<f64>) -> Result<Self> {
        if freqs.len() != gains.len() {
            return Err(DesignError::Curve(format!(
                "{} frequencies but {} gains",
                freqs.len(),
                gains.len()
            )));
        }
        if freqs.len() < 2 {
            return Err(DesignError::Curve(
                "at least two points are required".to_string(),
            ));
        }
        if freqs[0] != 0.0 || freqs[freqs.len() - 1] != 1.0 {
            return Err(DesignError::Curve(
                "frequency grid must start at 0 and end at 1".to_string(),
            ));
        }
        if let Some(i) = freqs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DesignError::Curve(format!(
                "frequency grid not strictly increasing at index {}",
                i + 1
            )));
        }
        if let Some(i) = gains.iter().position(|g| !g.is_finite() || *g < 0.0) {
            return Err(DesignError::Curve(format!(
                "gain {} at index {} is not finite and non-negative",
                gains[i], i
            )));
        }
        Ok(Self { freqs, gains })
    }

    pub fn freqs(&self) -> &[f64] {
        &self.freqs
    }

    pub fn gains(&self) -> &[f64] {
        &self.gains
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    /// Desired gain at an arbitrary frequency (linear interpolation)
    pub fn gain_at(&self, f: f64) -> f64 {
        interpolate(&self.freqs, &self.gains, f)
    }

    /// Iterate over (frequency, gain) pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.freqs.iter().copied().zip(self.gains.iter().copied())
    }
}

/// Compensation target built from the CIC model
#[derive(Debug, Clone)]
pub struct TargetCurve {
    /// Desired gain over the full band
    pub curve: FrequencyGainCurve,
    /// Index of the last grid point inside the passband
    pub passband_end_index: usize,
    /// Inverse CIC gain at the passband edge, where the stopband taper starts
    pub edge_gain: f64,
}

/// Build the inverse-droop target curve
///
/// In the passband the gain is 1/|H_cic|, exactly undoing the droop at each
/// grid point. Past the edge it falls linearly from the edge gain to zero at
/// Nyquist, clamped at zero.
pub fn build_target_curve(params: &FilterParameters) -> TargetCurve {
    let cic = CicResponse::from_params(params);
    let fp = params.passband_edge();
    let edge_gain = 1.0 / cic.magnitude_nyquist(fp);

    let freqs = linspace(0.0, 1.0, params.grid_points());
    let gains: Vec<f64> = freqs
        .iter()
        .map(|&f_n| {
            if f_n <= fp {
                1.0 / cic.magnitude_nyquist(f_n)
            } else {
                let t = (f_n - fp) / (1.0 - fp);
                (edge_gain * (1.0 - t)).max(0.0)
            }
        })
        .collect();

    // fp > 0 and freqs[0] == 0, so at least one point is in the passband
    let passband_end_index = freqs.partition_point(|&f| f <= fp) - 1;

    log::debug!(
        "Target curve: {} points, passband ends at index {} (edge gain {:.4})",
        freqs.len(),
        passband_end_index,
        edge_gain
    );

    TargetCurve {
        curve: FrequencyGainCurve { freqs, gains },
        passband_end_index,
        edge_gain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_processing::cic_magnitude;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_end_points() {
        let target = build_target_curve(&FilterParameters::default());
        let gains = target.curve.gains();
        assert_abs_diff_eq!(gains[0], 1.0, epsilon = 1e-15);
        assert_eq!(gains[gains.len() - 1], 0.0);
    }

    #[test]
    fn test_passband_inverts_droop() {
        let params = FilterParameters::default();
        let target = build_target_curve(&params);
        for (f, g) in target
            .curve
            .points()
            .take(target.passband_end_index + 1)
        {
            assert_relative_eq!(
                g * cic_magnitude(f * 0.5, params.order()),
                1.0,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_stopband_taper_is_decreasing_and_non_negative() {
        let target = build_target_curve(&FilterParameters::default());
        let stop = &target.curve.gains()[target.passband_end_index + 1..];
        assert!(!stop.is_empty());
        assert!(stop[0] <= target.edge_gain);
        assert!(stop.windows(2).all(|w| w[1] <= w[0]));
        assert!(stop.iter().all(|&g| g >= 0.0 && g.is_finite()));
    }

    #[test]
    fn test_passband_boundary_index() {
        let params = FilterParameters::default();
        let target = build_target_curve(&params);
        let freqs = target.curve.freqs();
        let idx = target.passband_end_index;
        assert!(freqs[idx] <= params.passband_edge());
        assert!(freqs[idx + 1] > params.passband_edge());
        // 1000-point grid: f_n = n/999, so n = floor(0.8 * 999) = 799
        assert_eq!(idx, 799);
    }

    #[test]
    fn test_gain_peaks_at_edge() {
        let target = build_target_curve(&FilterParameters::default());
        let max = target.curve.gains().iter().cloned().fold(0.0, f64::max);
        assert!(max <= target.edge_gain + 1e-12);
        // 1 / sinc(0.4)^5
        assert_relative_eq!(target.edge_gain, 4.02733, max_relative = 1e-5);
    }

    #[test]
    fn test_curve_validation() {
        assert!(FrequencyGainCurve::new(vec![0.0, 1.0], vec![1.0, 0.0]).is_ok());
        assert!(FrequencyGainCurve::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(FrequencyGainCurve::new(vec![0.0], vec![1.0]).is_err());
        assert!(FrequencyGainCurve::new(vec![0.1, 1.0], vec![1.0, 0.0]).is_err());
        assert!(FrequencyGainCurve::new(vec![0.0, 0.5, 0.5, 1.0], vec![1.0; 4]).is_err());
        assert!(FrequencyGainCurve::new(vec![0.0, 1.0], vec![1.0, -0.1]).is_err());
        assert!(FrequencyGainCurve::new(vec![0.0, 1.0], vec![f64::NAN, 0.0]).is_err());
    }

    #[test]
    fn test_gain_at_interpolates() {
        let curve = FrequencyGainCurve::new(vec![0.0, 0.5, 1.0], vec![1.0, 2.0, 0.0]).unwrap();
        assert_abs_diff_eq!(curve.gain_at(0.25), 1.5);
        assert_abs_diff_eq!(curve.gain_at(0.75), 1.0);
        assert_eq!(curve.len(), 3);
    }
}
