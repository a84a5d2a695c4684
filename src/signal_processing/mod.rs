pub mod cic_response;
pub mod filter;
pub mod fir_core;
pub mod fir_design;
pub mod math;
pub mod target_curve;
pub mod windows;

pub use cic_response::{CicResponse, cic_magnitude};
pub use filter::Filter;
pub use fir_core::{FirFilterCore, apply_fir};
pub use fir_design::{TapSequence, frequency_response, frequency_sampling_design};
pub use math::rms;
pub use target_curve::{FrequencyGainCurve, TargetCurve, build_target_curve};
