//! Configuration for the CIC compensator design.
//!
//! All parameters are validated once, when they are built, and are read-only
//! afterwards. A design can be described in a TOML file where every section
//! and field is optional:
//!
//! ```toml
//! [filter]
//! decimation = 4
//! order = 5
//! num_taps = 15
//! bit_width = 24
//! passband_edge = 0.8
//! grid_points = 1000
//! window = "hamming"
//!
//! [stimulus]
//! num_samples = 2000
//! amplitude = 100.0
//! sample_bits = 8
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{
    DEFAULT_GRID_POINTS, DEFAULT_SAMPLE_BITS, DEFAULT_STIMULUS_AMPLITUDE,
    DEFAULT_STIMULUS_SAMPLES, GRID_DENSITY_FACTOR, MAX_BIT_WIDTH, MAX_CIC_ORDER, MAX_SAMPLE_BITS,
};
use crate::error::{DesignError, Result};
use crate::signal_processing::cic_magnitude;

/// Tapering window applied to the frequency-sampled taps
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Hamming window (0.54, 0.46)
    #[default]
    Hamming,
    /// Hann window (0.5, 0.5)
    Hann,
    /// Blackman window (0.42, 0.5, 0.08)
    Blackman,
    /// No tapering
    Rectangular,
}

/// Compensation filter parameters
///
/// # Example
/// ```
/// use cic_compensator::config::FilterParameters;
///
/// let params = FilterParameters::new(4, 5, 15, 24, 0.8).unwrap();
/// assert_eq!(params.num_taps(), 15);
/// assert!(FilterParameters::new(4, 5, 16, 24, 0.8).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterParameters {
    decimation: u32,
    order: u32,
    num_taps: usize,
    bit_width: u32,
    passband_edge: f64,
    grid_points: usize,
    window: WindowKind,
}

impl FilterParameters {
    /// Build parameters with the default grid density and window
    ///
    /// # Errors
    /// Returns `DesignError::Config` if any parameter is out of range or the
    /// tap count is even.
    pub fn new(
        decimation: u32,
        order: u32,
        num_taps: usize,
        bit_width: u32,
        passband_edge: f64,
    ) -> Result<Self> {
        let params = Self {
            decimation,
            order,
            num_taps,
            bit_width,
            passband_edge,
            grid_points: DEFAULT_GRID_POINTS.max(num_taps.saturating_mul(GRID_DENSITY_FACTOR)),
            window: WindowKind::default(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Replace the number of points on the desired-gain grid
    pub fn with_grid_points(mut self, grid_points: usize) -> Result<Self> {
        self.grid_points = grid_points;
        self.validate()?;
        Ok(self)
    }

    /// Replace the tapering window
    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.decimation < 1 {
            return Err(DesignError::Config(
                "decimation factor must be at least 1".to_string(),
            ));
        }
        if self.order < 1 {
            return Err(DesignError::Config("CIC order must be at least 1".to_string()));
        }
        if self.num_taps == 0 || self.num_taps.is_multiple_of(2) {
            return Err(DesignError::Config(format!(
                "tap count must be odd and positive for a symmetric design, got {}",
                self.num_taps
            )));
        }
        if !(2..=MAX_BIT_WIDTH).contains(&self.bit_width) {
            return Err(DesignError::Config(format!(
                "coefficient bit width must be in 2..={}, got {}",
                MAX_BIT_WIDTH, self.bit_width
            )));
        }
        if !(self.passband_edge > 0.0 && self.passband_edge < 1.0) {
            return Err(DesignError::Config(format!(
                "passband edge must lie strictly between 0 and 1, got {}",
                self.passband_edge
            )));
        }
        let edge_gain = 1.0 / cic_magnitude(0.5 * self.passband_edge, self.order);
        if !edge_gain.is_finite() {
            return Err(DesignError::Config(format!(
                "inverse CIC gain at passband edge {} is not finite for order {}",
                self.passband_edge, self.order
            )));
        }
        if self.order > MAX_CIC_ORDER {
            return Err(DesignError::Config(format!(
                "CIC order must be at most {}, got {}",
                MAX_CIC_ORDER, self.order
            )));
        }
        let min_grid = self
            .num_taps
            .checked_mul(GRID_DENSITY_FACTOR)
            .ok_or_else(|| {
                DesignError::Config(format!("tap count {} is too large", self.num_taps))
            })?
            .max(2);
        if self.grid_points < min_grid {
            return Err(DesignError::Config(format!(
                "grid of {} points is too coarse for {} taps (need at least {})",
                self.grid_points, self.num_taps, min_grid
            )));
        }
        Ok(())
    }

    /// CIC decimation factor R
    pub fn decimation(&self) -> u32 {
        self.decimation
    }

    /// CIC order N (number of integrator/comb stages)
    pub fn order(&self) -> u32 {
        self.order
    }

    /// FIR tap count T (always odd)
    pub fn num_taps(&self) -> usize {
        self.num_taps
    }

    /// Coefficient word width B in bits
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Passband edge as a fraction of Nyquist
    pub fn passband_edge(&self) -> f64 {
        self.passband_edge
    }

    /// Number of points on the desired-gain grid
    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    pub fn window(&self) -> WindowKind {
        self.window
    }

    /// Group delay of the linear-phase design in samples
    pub fn group_delay_samples(&self) -> usize {
        (self.num_taps - 1) / 2
    }
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            decimation: 4,
            order: 5,
            num_taps: 15,
            bit_width: 24,
            passband_edge: 0.8,
            grid_points: DEFAULT_GRID_POINTS,
            window: WindowKind::Hamming,
        }
    }
}

/// Chirp stimulus configuration
///
/// Samples are at most [`MAX_SAMPLE_BITS`] wide, so the stimulus file never
/// leaves ±127 whatever the amplitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StimulusConfig {
    num_samples: usize,
    amplitude: f64,
    sample_bits: u32,
}

impl StimulusConfig {
    /// # Errors
    /// Returns `DesignError::Config` for an empty stimulus, a negative or
    /// non-finite amplitude, or a sample width outside 2..=8.
    pub fn new(num_samples: usize, amplitude: f64, sample_bits: u32) -> Result<Self> {
        if num_samples == 0 {
            return Err(DesignError::Config(
                "stimulus must contain at least one sample".to_string(),
            ));
        }
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(DesignError::Config(format!(
                "stimulus amplitude must be finite and non-negative, got {}",
                amplitude
            )));
        }
        if !(2..=MAX_SAMPLE_BITS).contains(&sample_bits) {
            return Err(DesignError::Config(format!(
                "sample bit width must be in 2..={}, got {}",
                MAX_SAMPLE_BITS, sample_bits
            )));
        }
        Ok(Self {
            num_samples,
            amplitude,
            sample_bits,
        })
    }

    /// Stimulus length L in samples
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn sample_bits(&self) -> u32 {
        self.sample_bits
    }
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            num_samples: DEFAULT_STIMULUS_SAMPLES,
            amplitude: DEFAULT_STIMULUS_AMPLITUDE,
            sample_bits: DEFAULT_SAMPLE_BITS,
        }
    }
}

/// Optional per-field overrides for [`FilterParameters`]
///
/// Used both as the `[filter]` section of a TOML file and for command-line
/// overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOverrides {
    pub decimation: Option<u32>,
    pub order: Option<u32>,
    pub num_taps: Option<usize>,
    pub bit_width: Option<u32>,
    pub passband_edge: Option<f64>,
    pub grid_points: Option<usize>,
    pub window: Option<WindowKind>,
}

impl FilterOverrides {
    /// Apply the overrides on top of `base` and re-validate
    pub fn apply(&self, base: &FilterParameters) -> Result<FilterParameters> {
        let num_taps = self.num_taps.unwrap_or(base.num_taps);
        let params = FilterParameters::new(
            self.decimation.unwrap_or(base.decimation),
            self.order.unwrap_or(base.order),
            num_taps,
            self.bit_width.unwrap_or(base.bit_width),
            self.passband_edge.unwrap_or(base.passband_edge),
        )?;
        let grid_points = match self.grid_points {
            Some(points) => points,
            None => base
                .grid_points
                .max(num_taps.saturating_mul(GRID_DENSITY_FACTOR)),
        };
        Ok(params
            .with_grid_points(grid_points)?
            .with_window(self.window.unwrap_or(base.window)))
    }
}

/// Optional per-field overrides for [`StimulusConfig`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StimulusOverrides {
    pub num_samples: Option<usize>,
    pub amplitude: Option<f64>,
    pub sample_bits: Option<u32>,
}

impl StimulusOverrides {
    pub fn apply(&self, base: &StimulusConfig) -> Result<StimulusConfig> {
        StimulusConfig::new(
            self.num_samples.unwrap_or(base.num_samples),
            self.amplitude.unwrap_or(base.amplitude),
            self.sample_bits.unwrap_or(base.sample_bits),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TomlConfig {
    filter: FilterOverrides,
    stimulus: StimulusOverrides,
}

/// Complete design configuration
///
/// Use `DesignConfig::default()` for the reference compensator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DesignConfig {
    pub filter: FilterParameters,
    pub stimulus: StimulusConfig,
}

impl DesignConfig {
    /// Parse and validate a TOML description; missing fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: TomlConfig =
            toml::from_str(content).map_err(|e| DesignError::ConfigFile(e.to_string()))?;
        let defaults = Self::default();
        Ok(Self {
            filter: raw.filter.apply(&defaults.filter)?,
            stimulus: raw.stimulus.apply(&defaults.stimulus)?,
        })
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DesignError::io(path, e))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        let params = FilterParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.decimation(), 4);
        assert_eq!(params.order(), 5);
        assert_eq!(params.num_taps(), 15);
        assert_eq!(params.bit_width(), 24);
        assert_eq!(params.window(), WindowKind::Hamming);
        assert_eq!(params.group_delay_samples(), 7);
    }

    #[test]
    fn test_even_tap_count_rejected() {
        let err = FilterParameters::new(4, 5, 16, 24, 0.8).unwrap_err();
        assert!(matches!(err, DesignError::Config(_)));
        assert!(FilterParameters::new(4, 5, 0, 24, 0.8).is_err());
    }

    #[test]
    fn test_out_of_range_parameters_rejected() {
        assert!(FilterParameters::new(0, 5, 15, 24, 0.8).is_err());
        assert!(FilterParameters::new(4, 0, 15, 24, 0.8).is_err());
        assert!(FilterParameters::new(4, 5, 15, 1, 0.8).is_err());
        assert!(FilterParameters::new(4, 5, 15, 33, 0.8).is_err());
        assert!(FilterParameters::new(4, 5, 15, 24, 0.0).is_err());
        assert!(FilterParameters::new(4, 5, 15, 24, 1.0).is_err());
        assert!(FilterParameters::new(4, 5, 15, 24, f64::NAN).is_err());
    }

    #[test]
    fn test_cic_order_bounded() {
        assert!(FilterParameters::new(4, MAX_CIC_ORDER, 15, 24, 0.8).is_ok());
        let err = FilterParameters::new(4, MAX_CIC_ORDER + 1, 15, 24, 0.8).unwrap_err();
        assert!(matches!(err, DesignError::Config(_)));
        assert!(FilterParameters::new(4, 3000, 15, 24, 0.8).is_err());
        assert!(FilterParameters::new(4, u32::MAX, 15, 24, 0.8).is_err());
    }

    #[test]
    fn test_infinite_edge_gain_rejected() {
        // sin(π/2 · fp)/(π/2 · fp) at fp just below 1 is about 2/π, so even
        // the highest order keeps the gain finite
        let params = FilterParameters::new(4, MAX_CIC_ORDER, 15, 24, 0.999).unwrap();
        let edge = 1.0 / cic_magnitude(0.5 * params.passband_edge(), params.order());
        assert!(edge.is_finite());

        let mut params = FilterParameters::default();
        params.order = 3000;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("not finite"), "{}", err);
    }

    #[test]
    fn test_huge_tap_count_is_config_error() {
        let err = FilterParameters::new(4, 5, usize::MAX, 24, 0.8).unwrap_err();
        assert!(matches!(err, DesignError::Config(_)));

        let overrides = FilterOverrides {
            num_taps: Some(usize::MAX),
            ..Default::default()
        };
        let err = overrides.apply(&FilterParameters::default()).unwrap_err();
        assert!(matches!(err, DesignError::Config(_)));
    }

    #[test]
    fn test_grid_must_be_denser_than_taps() {
        let params = FilterParameters::new(4, 5, 15, 24, 0.8).unwrap();
        assert!(params.clone().with_grid_points(149).is_err());
        assert!(params.with_grid_points(150).is_ok());
    }

    #[test]
    fn test_large_tap_count_raises_default_grid() {
        let params = FilterParameters::new(4, 5, 201, 24, 0.8).unwrap();
        assert_eq!(params.grid_points(), 2010);
    }

    #[test]
    fn test_single_tap_is_valid() {
        let params = FilterParameters::new(1, 1, 1, 2, 0.5).unwrap();
        assert_eq!(params.group_delay_samples(), 0);
    }

    #[test]
    fn test_stimulus_validation() {
        assert!(StimulusConfig::new(0, 100.0, 8).is_err());
        assert!(StimulusConfig::new(10, -1.0, 8).is_err());
        assert!(StimulusConfig::new(10, f64::INFINITY, 8).is_err());
        assert!(StimulusConfig::new(10, 100.0, 1).is_err());
        assert!(StimulusConfig::new(10, 100.0, 8).is_ok());
        assert!(StimulusConfig::new(10, 100.0, 9).is_err());
        assert!(StimulusConfig::new(10, 100.0, 32).is_err());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = DesignConfig::from_toml_str("").unwrap();
        assert_eq!(config, DesignConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = DesignConfig::from_toml_str(
            r#"
            [filter]
            num_taps = 31
            window = "blackman"

            [stimulus]
            num_samples = 4000
            "#,
        )
        .unwrap();
        assert_eq!(config.filter.num_taps(), 31);
        assert_eq!(config.filter.window(), WindowKind::Blackman);
        assert_eq!(config.filter.order(), 5);
        assert_eq!(config.stimulus.num_samples(), 4000);
        assert_eq!(config.stimulus.sample_bits(), 8);
    }

    #[test]
    fn test_toml_validation_errors() {
        let err = DesignConfig::from_toml_str("[filter]\nnum_taps = 14\n").unwrap_err();
        assert!(matches!(err, DesignError::Config(_)));

        let err = DesignConfig::from_toml_str("[filter]\nbogus = 1\n").unwrap_err();
        assert!(matches!(err, DesignError::ConfigFile(_)));
    }
}
