//! Positional servo math
//!
//! Converts angles into PWM duty values for the configured calibration.

pub mod mapping;

pub use mapping::{DutyMap, CENTER_ANGLE_DEG, MAX_ANGLE_DEG};
