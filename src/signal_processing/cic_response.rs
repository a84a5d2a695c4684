use std::f64::consts::PI;

use crate::config::FilterParameters;
use crate::constants::CIC_EPSILON;

/// Magnitude of an `order`-stage CIC response at normalized frequency `f`
///
/// `f` is in cycles/sample over [0, 0.5]. The response is |sin(πf)/(πf)|^N;
/// a zero frequency is replaced by [`CIC_EPSILON`] so the result is always
/// finite and equals 1 at DC.
pub fn cic_magnitude(f: f64, order: u32) -> f64 {
    let f = if f == 0.0 { CIC_EPSILON } else { f };
    let x = PI * f;
    let order = i32::try_from(order).unwrap_or(i32::MAX);
    (x.sin() / x).abs().powi(order)
}

/// CIC response model bound to a fixed order
///
/// Convenience wrapper so callers holding [`FilterParameters`] do not have to
/// thread the order through every call.
#[derive(Debug, Clone, Copy)]
pub struct CicResponse {
    order: u32,
}

impl CicResponse {
    pub fn new(order: u32) -> Self {
        Self { order }
    }

    pub fn from_params(params: &FilterParameters) -> Self {
        Self::new(params.order())
    }

    /// Magnitude at `f` cycles/sample
    pub fn magnitude(&self, f: f64) -> f64 {
        cic_magnitude(f, self.order)
    }

    /// Magnitude at `f_nyq`, a fraction of Nyquist in [0, 1]
    pub fn magnitude_nyquist(&self, f_nyq: f64) -> f64 {
        self.magnitude(f_nyq * 0.5)
    }

    pub fn order(&self) -> u32 {
        self.order
    }
}
