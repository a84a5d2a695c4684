//! CIC decimator droop compensation.
//!
//! Designs a linear-phase FIR filter that undoes the sinc^N passband droop of
//! a CIC decimator, quantizes its coefficients for hardware, and generates a
//! droopy chirp test vector to check the correction.

pub mod config;
pub mod constants;
pub mod design;
pub mod error;
pub mod fixed_point;
pub mod output;
pub mod signal_processing;
pub mod simulation;

pub use config::{DesignConfig, FilterParameters, StimulusConfig, WindowKind};
pub use design::{CompensatorDesign, DesignOutcome, DesignReport};
pub use error::{DesignError, Result};
