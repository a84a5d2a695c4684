use crate::signal_processing::{Filter, TapSequence};

/// Direct-form causal FIR filter
///
/// Holds the delay line and tap coefficients. Starts from zero state, so the
/// first `T - 1` outputs include the filter's start-up transient.
pub struct FirFilterCore {
    taps: Vec<f64>,
    delay_line: Vec<f64>,
    pos: usize,
}

impl FirFilterCore {
    /// Create a new FIR filter core with the given tap coefficients
    pub fn new(taps: Vec<f64>) -> Self {
        Self {
            delay_line: vec![0.0; taps.len()],
            taps,
            pos: 0,
        }
    }

    pub fn from_taps(taps: &TapSequence) -> Self {
        Self::new(taps.taps().to_vec())
    }

    /// Process a single sample through the filter
    pub fn process(&mut self, sample: f64) -> f64 {
        let n = self.taps.len();
        if n == 0 {
            return 0.0;
        }
        self.delay_line[self.pos] = sample;

        let mut output = 0.0f64;

        // Iterate the ring buffer in two contiguous reverse ranges to avoid
        // modulo arithmetic in the inner convolution loop.
        let mut tap_i = 0usize;
        for delay_idx in (0..=self.pos).rev() {
            output += self.taps[tap_i] * self.delay_line[delay_idx];
            tap_i += 1;
        }
        for delay_idx in ((self.pos + 1)..n).rev() {
            output += self.taps[tap_i] * self.delay_line[delay_idx];
            tap_i += 1;
        }
        debug_assert_eq!(tap_i, n);

        self.pos += 1;
        if self.pos == n {
            self.pos = 0;
        }
        output
    }

    /// Clear the delay line back to zero state
    pub fn reset(&mut self) {
        self.delay_line.fill(0.0);
        self.pos = 0;
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }
}

impl Filter for FirFilterCore {
    fn process(&mut self, sample: f64) -> f64 {
        FirFilterCore::process(self, sample)
    }

    fn reset(&mut self) {
        FirFilterCore::reset(self)
    }
}

/// Apply `taps` to `input` as a causal FIR filter with zero initial state
///
/// Equivalent to `y[i] = sum_k taps[k] * x[i - k]` with `x` zero before the
/// start. The output has the same length as the input.
pub fn apply_fir(taps: &TapSequence, input: &[f64]) -> Vec<f64> {
    FirFilterCore::from_taps(taps).filter_signal(input)
}
