//! Numeric constants shared by the design pipeline
//!
//! Defaults reproduce the reference compensator: a 5th-order CIC decimating
//! by 4, corrected with a 15-tap FIR quantized to 24 bits up to 80% of Nyquist.

/// Substituted for a zero frequency in the CIC model so that sin(x)/x stays finite.
pub const CIC_EPSILON: f64 = 1e-9;

/// Default number of points on the desired-gain grid.
pub const DEFAULT_GRID_POINTS: usize = 1000;

/// The gain grid must be at least this many times denser than the tap count.
pub const GRID_DENSITY_FACTOR: usize = 10;

/// Default stimulus length in samples (one notional second).
pub const DEFAULT_STIMULUS_SAMPLES: usize = 2000;

/// Peak amplitude of the undroopy chirp, in output integer units.
pub const DEFAULT_STIMULUS_AMPLITUDE: f64 = 100.0;

/// Width of the hardware sample path fed by the stimulus.
pub const DEFAULT_SAMPLE_BITS: u32 = 8;

/// Widest coefficient word the quantizer supports.
pub const MAX_BIT_WIDTH: u32 = 32;

/// Widest stimulus sample word; keeps every sample within ±127.
pub const MAX_SAMPLE_BITS: u32 = 8;

/// Highest CIC order accepted. Practical decimators stay well below this,
/// and sinc^N at the passband edge stays far from underflow.
pub const MAX_CIC_ORDER: u32 = 64;

/// Tolerance used when checking tap symmetry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;
