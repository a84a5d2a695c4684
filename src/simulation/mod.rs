mod chirp;
mod measure;

pub use chirp::{
    Stimulus, apply_cic_droop, cic_envelope, generate_chirp, generate_stimulus,
    instantaneous_frequency,
};
pub use measure::{
    Verification, VerificationReport, compensated_response, droop_error, passband_end_sample,
    passband_flatness, verify,
};
