//! Fixed-point quantization of coefficients and samples.
//!
//! Rounding is round-half-away-from-zero throughout: 0.5 → 1, -0.5 → -1,
//! 2.5 → 3. Full scale for a `B`-bit word is `2^(B-1) - 1`, so the most
//! negative code `-2^(B-1)` is never produced.

use serde::Serialize;

use crate::error::{DesignError, Result};

/// Round to the nearest integer, ties away from zero
///
/// Non-finite input saturates (NaN maps to 0), matching `f64 as i64`.
pub fn round_half_away(v: f64) -> i64 {
    v.round() as i64
}

/// Largest representable magnitude of a `bits`-wide signed word
///
/// `bits` must be in 2..=32.
pub fn full_scale(bits: u32) -> i64 {
    (1i64 << (bits - 1)) - 1
}

/// Scale by full scale and round; no range check
pub fn quantize(values: &[f64], bits: u32) -> Vec<i64> {
    let scale = full_scale(bits) as f64;
    values.iter().map(|&v| round_half_away(v * scale)).collect()
}

/// Quantize filter coefficients to `bits`-wide signed integers
///
/// Coefficients are never clipped: silently saturating a tap would change
/// the hardware response without notice.
///
/// # Errors
/// Returns `DesignError::NonFiniteCoefficient` for a NaN or infinite tap and
/// `DesignError::CoefficientOverflow` for the first coefficient whose rounded
/// value exceeds ±(2^(bits-1) - 1).
pub fn quantize_taps(taps: &[f64], bits: u32) -> Result<Vec<i64>> {
    let limit = full_scale(bits);
    let scale = limit as f64;
    taps.iter()
        .enumerate()
        .map(|(index, &tap)| {
            let scaled = tap * scale;
            if !scaled.is_finite() {
                return Err(DesignError::NonFiniteCoefficient { index, value: tap });
            }
            let value = round_half_away(scaled);
            if value.unsigned_abs() > limit as u64 {
                Err(DesignError::CoefficientOverflow {
                    index,
                    value,
                    limit,
                })
            } else {
                Ok(value)
            }
        })
        .collect()
}

/// Round samples already expressed in integer units and clip to ±(2^(bits-1) - 1)
pub fn quantize_samples(samples: &[f64], bits: u32) -> Vec<i64> {
    let limit = full_scale(bits);
    samples
        .iter()
        .map(|&s| round_half_away(s).clamp(-limit, limit))
        .collect()
}

/// Map quantized values back to the real line by dividing by full scale
pub fn dequantize(values: &[i64], bits: u32) -> Vec<f64> {
    let scale = full_scale(bits) as f64;
    values.iter().map(|&v| v as f64 / scale).collect()
}

/// Smallest power-of-two attenuation that brings every tap into [-1, 1]
pub fn headroom_shift(taps: &[f64]) -> u32 {
    let peak = taps.iter().fold(0.0f64, |acc, t| acc.max(t.abs()));
    let mut shift = 0u32;
    while peak / 2f64.powi(shift as i32) > 1.0 && shift < 63 {
        shift += 1;
    }
    shift
}

/// Quantized coefficient table ready for hardware
///
/// The real-valued response is `values[i] * 2^shift / full_scale(bit_width)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantizedTapSequence {
    pub bit_width: u32,
    pub shift: u32,
    pub values: Vec<i64>,
}

impl QuantizedTapSequence {
    /// Quantize `taps`, first attenuating by the smallest power of two that
    /// keeps every coefficient representable
    pub fn from_taps(taps: &[f64], bit_width: u32) -> Result<Self> {
        let shift = headroom_shift(taps);
        let gain = 2f64.powi(-(shift as i32));
        let scaled: Vec<f64> = taps.iter().map(|t| t * gain).collect();
        let values = quantize_taps(&scaled, bit_width)?;
        if shift > 0 {
            log::warn!(
                "Coefficients exceed unity by up to {:.3}; table attenuated by 2^-{}",
                taps.iter().fold(0.0f64, |acc, t| acc.max(t.abs())),
                shift
            );
        }
        Ok(Self {
            bit_width,
            shift,
            values,
        })
    }

    /// Real-valued coefficients represented by the table, gain restored
    pub fn dequantize(&self) -> Vec<f64> {
        let gain = 2f64.powi(self.shift as i32);
        dequantize(&self.values, self.bit_width)
            .into_iter()
            .map(|v| v * gain)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn full_scale(&self) -> i64 {
        full_scale(self.bit_width)
    }
}
