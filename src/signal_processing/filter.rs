/// Common trait for sample-by-sample filters
pub trait Filter {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f64) -> f64;

    /// Clear any internal state back to zero
    fn reset(&mut self);

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Filter a whole signal from zero initial state into a new buffer
    fn filter_signal(&mut self, input: &[f64]) -> Vec<f64> {
        self.reset();
        let mut output = input.to_vec();
        self.process_buffer(&mut output);
        output
    }
}
