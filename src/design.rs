use serde::Serialize;

use crate::config::{DesignConfig, FilterParameters, StimulusConfig};
use crate::error::Result;
use crate::fixed_point::QuantizedTapSequence;
use crate::simulation::{Stimulus, Verification, VerificationReport, generate_stimulus, verify};
use crate::signal_processing::{
    TapSequence, TargetCurve, build_target_curve, frequency_sampling_design,
};

/// Compensation filter derived from a set of [`FilterParameters`]
#[derive(Debug, Clone)]
pub struct CompensatorDesign {
    pub params: FilterParameters,
    pub target: TargetCurve,
    pub taps: TapSequence,
    pub quantized: QuantizedTapSequence,
}

impl CompensatorDesign {
    /// Build the target curve, synthesize the taps and quantize them
    ///
    /// # Errors
    /// Returns `DesignError::CoefficientOverflow` if a coefficient cannot be
    /// represented even after the headroom shift.
    pub fn new(params: &FilterParameters) -> Result<Self> {
        let target = build_target_curve(params);
        let taps = frequency_sampling_design(&target.curve, params.num_taps(), params.window());
        let quantized = QuantizedTapSequence::from_taps(taps.taps(), params.bit_width())?;

        log::info!(
            "Designed {}-tap compensator for N={} R={} (passband {:.0}% of Nyquist, {}-bit, shift {})",
            params.num_taps(),
            params.order(),
            params.decimation(),
            params.passband_edge() * 100.0,
            params.bit_width(),
            quantized.shift
        );

        Ok(Self {
            params: params.clone(),
            target,
            taps,
            quantized,
        })
    }

    /// Grid index of the last passband point of the target curve
    pub fn passband_end_index(&self) -> usize {
        self.target.passband_end_index
    }
}

/// Everything one run of the design flow produces
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    pub config: DesignConfig,
    pub design: CompensatorDesign,
    pub stimulus: Stimulus,
    pub verification: Verification,
}

impl DesignOutcome {
    /// Run the whole flow: design, stimulus generation and verification
    pub fn run(config: &DesignConfig) -> Result<Self> {
        let design = CompensatorDesign::new(&config.filter)?;
        let stimulus = generate_stimulus(&config.filter, &config.stimulus);
        let verification = verify(&config.filter, &config.stimulus, &stimulus, &design.taps);
        Ok(Self {
            config: config.clone(),
            design,
            stimulus,
            verification,
        })
    }

    pub fn report(&self) -> DesignReport {
        DesignReport {
            filter: self.config.filter.clone(),
            stimulus: self.config.stimulus.clone(),
            passband_end_index: self.design.passband_end_index(),
            group_delay_samples: self.design.taps.group_delay_samples(),
            taps: self.design.taps.taps().to_vec(),
            quantized: self.design.quantized.clone(),
            verification: self.verification.report.clone(),
        }
    }
}

/// Machine-readable summary of a design run
#[derive(Debug, Clone, Serialize)]
pub struct DesignReport {
    pub filter: FilterParameters,
    pub stimulus: StimulusConfig,
    pub passband_end_index: usize,
    pub group_delay_samples: usize,
    pub taps: Vec<f64>,
    pub quantized: QuantizedTapSequence,
    pub verification: VerificationReport,
}
